use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use common::types::Detail;
use service::catalog::domain::ProductView;

use crate::errors::ApiError;
use crate::extract::CurrentUser;
use crate::forms::FormParts;
use crate::state::ServerState;

#[utoipa::path(get, path = "/products/{product_id}", tag = "products", params(("product_id" = i32, Path, description = "Product id")), responses((status = 200, description = "OK", body = crate::openapi::ProductResponse), (status = 404, description = "Product not found")))]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(product_id), _rejection): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<ProductView>, ApiError> {
    Ok(Json(state.catalog.get_product(product_id).await?))
}

#[utoipa::path(post, path = "/products/", tag = "products", request_body(content = crate::openapi::ProductForm, content_type = "multipart/form-data"), responses((status = 200, description = "OK", body = crate::openapi::ProductResponse), (status = 400, description = "Bad Request"), (status = 401, description = "Not authenticated")), security(("bearer" = [])))]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> Result<Json<ProductView>, ApiError> {
    let input = FormParts::read(multipart).await?.into_new_product()?;
    Ok(Json(state.catalog.create_product(&user, input).await?))
}

#[utoipa::path(put, path = "/products/{product_id}", tag = "products", params(("product_id" = i32, Path, description = "Product id")), request_body(content = crate::openapi::ProductForm, content_type = "multipart/form-data"), responses((status = 200, description = "OK", body = crate::openapi::ProductResponse), (status = 404, description = "Product not found")), security(("bearer" = [])))]
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(product_id), _rejection): WithRejection<Path<i32>, ApiError>,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> Result<Json<ProductView>, ApiError> {
    let patch = FormParts::read(multipart).await?.into_product_patch()?;
    Ok(Json(state.catalog.update_product(&user, product_id, patch).await?))
}

#[utoipa::path(delete, path = "/products/{product_id}", tag = "products", params(("product_id" = i32, Path, description = "Product id")), responses((status = 200, description = "OK", body = crate::openapi::DetailResponse), (status = 404, description = "Product not found")), security(("bearer" = [])))]
pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(product_id), _rejection): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Detail>, ApiError> {
    state.catalog.delete_product(&user, product_id).await?;
    Ok(Json(Detail::new("Product Eliminated")))
}
