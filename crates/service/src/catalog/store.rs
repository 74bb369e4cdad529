//! Catalog Store: read helpers and association resolution over the `models` entities.
use models::{category, product};
use sea_orm::{ConnectionTrait, EntityTrait, ModelTrait};
use tracing::warn;

use super::domain::{CategoryView, ProductView};
use crate::errors::ServiceError;

/// Keep the ids that name an existing category, in request order and without duplicates.
/// Unknown ids are dropped and reported.
pub async fn resolve_categories<C: ConnectionTrait>(db: &C, requested: &[i32]) -> Result<Vec<i32>, ServiceError> {
    let existing = category::find_existing(db, requested).await?;
    let mut resolved: Vec<i32> = Vec::with_capacity(requested.len());
    let mut dropped: Vec<i32> = Vec::new();
    for id in requested {
        if existing.iter().any(|c| c.id == *id) {
            if !resolved.contains(id) {
                resolved.push(*id);
            }
        } else if !dropped.contains(id) {
            dropped.push(*id);
        }
    }
    if !dropped.is_empty() {
        warn!(?dropped, "unknown category ids dropped");
    }
    Ok(resolved)
}

pub async fn find_product<C: ConnectionTrait>(db: &C, id: i32) -> Result<product::Model, ServiceError> {
    product::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Product"))
}

pub async fn find_category<C: ConnectionTrait>(db: &C, id: i32) -> Result<category::Model, ServiceError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))
}

pub async fn product_view<C: ConnectionTrait>(db: &C, model: product::Model) -> Result<ProductView, ServiceError> {
    let mut category_ids: Vec<i32> = model
        .find_related(category::Entity)
        .all(db)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    category_ids.sort_unstable();
    category_ids.dedup();
    let images_secondary = model.secondary_images();
    Ok(ProductView {
        id: model.id,
        name: model.name,
        description: model.description,
        image_main: model.image_main,
        images_secondary,
        active: model.active,
        category_ids,
    })
}

pub async fn category_view<C: ConnectionTrait>(db: &C, model: category::Model) -> Result<CategoryView, ServiceError> {
    let mut product_ids: Vec<i32> = model
        .find_related(product::Entity)
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    product_ids.sort_unstable();
    product_ids.dedup();
    Ok(CategoryView {
        id: model.id,
        name: model.name,
        description: model.description,
        image: model.image,
        product_ids,
    })
}
