//! Auth module: credential persistence behind a repository trait, the
//! Credential Store that hashes and verifies passwords, and the stateless
//! Token Service issuing bearer tokens.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod credentials;
pub mod token;

pub use credentials::CredentialStore;
pub use token::TokenService;
