use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use common::types::Detail;
use service::catalog::domain::CategoryView;

use crate::errors::ApiError;
use crate::extract::CurrentUser;
use crate::forms::FormParts;
use crate::state::ServerState;

#[utoipa::path(get, path = "/categories/{category_id}", tag = "categories", params(("category_id" = i32, Path, description = "Category id")), responses((status = 200, description = "OK", body = crate::openapi::CategoryResponse), (status = 404, description = "Category not found")))]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(category_id), _rejection): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<CategoryView>, ApiError> {
    Ok(Json(state.catalog.get_category(category_id).await?))
}

#[utoipa::path(post, path = "/categories/", tag = "categories", request_body(content = crate::openapi::CategoryForm, content_type = "multipart/form-data"), responses((status = 200, description = "OK", body = crate::openapi::CategoryResponse), (status = 400, description = "Bad Request"), (status = 401, description = "Not authenticated")), security(("bearer" = [])))]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> Result<Json<CategoryView>, ApiError> {
    let input = FormParts::read(multipart).await?.into_new_category();
    Ok(Json(state.catalog.create_category(&user, input).await?))
}

#[utoipa::path(put, path = "/categories/{category_id}", tag = "categories", params(("category_id" = i32, Path, description = "Category id")), request_body(content = crate::openapi::CategoryForm, content_type = "multipart/form-data"), responses((status = 200, description = "OK", body = crate::openapi::CategoryResponse), (status = 404, description = "Category not found")), security(("bearer" = [])))]
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(category_id), _rejection): WithRejection<Path<i32>, ApiError>,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> Result<Json<CategoryView>, ApiError> {
    let patch = FormParts::read(multipart).await?.into_category_patch();
    Ok(Json(state.catalog.update_category(&user, category_id, patch).await?))
}

#[utoipa::path(delete, path = "/categories/{category_id}", tag = "categories", params(("category_id" = i32, Path, description = "Category id")), responses((status = 200, description = "OK", body = crate::openapi::DetailResponse), (status = 404, description = "Category not found")), security(("bearer" = [])))]
pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Path(category_id), _rejection): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Detail>, ApiError> {
    state.catalog.delete_category(&user, category_id).await?;
    Ok(Json(Detail::new("Category Eliminated")))
}
