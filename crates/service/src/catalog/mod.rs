//! Catalog: products, categories and their many-to-many association, with
//! image files kept in the [`MediaStore`](crate::media::MediaStore).

pub mod domain;
pub mod category_ids;
pub mod store;
pub mod service;

pub use service::CatalogService;
