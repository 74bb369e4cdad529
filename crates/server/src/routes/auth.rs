use axum::{extract::State, http::StatusCode, Form, Json};
use axum_extra::extract::WithRejection;
use service::auth::domain::{AccessToken, LoginInput, RegisterInput};
use service::auth::errors::AuthError;
use tracing::info;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(post, path = "/auth/", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Username taken")))]
pub async fn register(
    State(state): State<ServerState>,
    WithRejection(Json(input), _rejection): WithRejection<Json<RegisterInput>, ApiError>,
) -> Result<StatusCode, ApiError> {
    state.credentials.register(input).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(post, path = "/auth/token", tag = "auth", request_body(content = crate::openapi::LoginRequest, content_type = "application/x-www-form-urlencoded"), responses((status = 200, description = "Token issued", body = crate::openapi::TokenResponse), (status = 401, description = "Incorrect username or password")))]
pub async fn token(
    State(state): State<ServerState>,
    WithRejection(Form(input), _rejection): WithRejection<Form<LoginInput>, ApiError>,
) -> Result<Json<AccessToken>, ApiError> {
    let user = state
        .credentials
        .verify(input)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    let token = state.tokens.issue(user.id, &user.username)?;
    info!(user_id = user.id, exp = token.expires_at, "token_issued");
    Ok(Json(token))
}
