use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use service::auth::domain::Identity;
use tracing::warn;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Identity of the caller, taken from a verified `Authorization: Bearer` token.
/// Rejects with 401 when the header is missing or the token does not verify.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

#[axum::async_trait]
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let TypedHeader(auth) = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::unauthorized("Not authenticated"))?;
        match state.tokens.verify(auth.token()) {
            Ok(identity) => Ok(CurrentUser(identity)),
            Err(e) => {
                warn!(path = %parts.uri.path(), error = %e, "bearer token rejected");
                Err(e.into())
            }
        }
    }
}
