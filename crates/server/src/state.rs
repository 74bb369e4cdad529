use std::sync::Arc;

use service::auth::{repo::seaorm::SeaOrmCredentialRepository, CredentialStore, TokenService};
use service::catalog::CatalogService;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub tokens: Arc<TokenService>,
    pub credentials: Arc<CredentialStore<SeaOrmCredentialRepository>>,
    pub catalog: Arc<CatalogService>,
}
