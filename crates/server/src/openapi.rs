use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct DetailResponse { pub detail: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct TokenResponse { pub access_token: String, pub token_type: String }

/// Multipart body for product create/update. Files are binary parts.
#[derive(ToSchema)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    /// Comma separated category ids, e.g. `1,2`
    pub category_ids: Option<String>,
    /// Binary file part
    #[schema(value_type = Option<String>)]
    pub image_main: Option<Vec<u8>>,
    /// Repeatable binary file part
    #[schema(value_type = Vec<String>)]
    pub images_secondary: Vec<Vec<u8>>,
}

/// Multipart body for category create/update.
#[derive(ToSchema)]
pub struct CategoryForm {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub image: Option<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_main: Option<String>,
    pub images_secondary: Vec<String>,
    pub active: bool,
    pub category_ids: Vec<i32>,
}

#[derive(ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub product_ids: Vec<i32>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::token,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::categories::get,
        crate::routes::categories::create,
        crate::routes::categories::update,
        crate::routes::categories::delete,
    ),
    components(
        schemas(
            HealthResponse,
            DetailResponse,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            ProductForm,
            CategoryForm,
            ProductResponse,
            CategoryResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "products"),
        (name = "categories")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/auth/", "/auth/token", "/products/{product_id}", "/categories/", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
