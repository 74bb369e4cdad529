use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Detail;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use tracing::error;

/// Error body `{"detail": ...}` with its status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, detail) }

    pub fn unauthorized(detail: impl Into<String>) -> Self { Self::new(StatusCode::UNAUTHORIZED, detail) }

    fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut resp = (self.status, Json(Detail::new(self.detail))).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            resp.headers_mut().insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        resp
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => ApiError::bad_request(msg),
            AuthError::DuplicateUsername => ApiError::new(StatusCode::CONFLICT, "Username already registered"),
            AuthError::InvalidCredentials => ApiError::unauthorized("Incorrect username or password"),
            AuthError::InvalidToken(_) => ApiError::unauthorized("Could not validate credentials"),
            other => ApiError::internal(format!("auth error {}: {}", other.code(), other)),
        }
    }
}

// Extractor rejections keep their status but answer with the `detail` body.
macro_rules! rejection_into_api_error {
    ($($rejection:ty),+ $(,)?) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(r: $rejection) -> Self { ApiError::new(r.status(), r.body_text()) }
            }
        )+
    };
}

rejection_into_api_error!(PathRejection, JsonRejection, FormRejection, MultipartRejection);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidInput(msg) => ApiError::bad_request(msg),
            ServiceError::NotFound(msg) => ApiError::new(StatusCode::NOT_FOUND, msg),
            other => ApiError::internal(other),
        }
    }
}
