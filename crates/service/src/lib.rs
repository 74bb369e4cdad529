//! Service layer for the catalog backend.
//! - `auth`: Credential Store and Token Service.
//! - `media`: filesystem Media Store for uploaded images.
//! - `catalog`: product/category orchestration over the `models` entities.

pub mod errors;
pub mod auth;
pub mod media;
pub mod catalog;
#[cfg(test)]
pub mod test_support;
