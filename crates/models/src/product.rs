use sea_orm::{entity::prelude::*, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{category, category_product, errors::ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_main: Option<String>,
    /// JSON array of stored paths.
    #[sea_orm(column_type = "Text", nullable)]
    pub images_secondary: Option<String>,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { CategoryProduct }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CategoryProduct => Entity::has_many(category_product::Entity).into(),
        }
    }
}

impl Related<category_product::Entity> for Entity {
    fn to() -> RelationDef { Relation::CategoryProduct.def() }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { category_product::Relation::Category.def() }

    fn via() -> Option<RelationDef> { Some(category_product::Relation::Product.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decoded secondary image paths. Missing or corrupt payloads yield an empty list.
    pub fn secondary_images(&self) -> Vec<String> {
        self.images_secondary.as_deref().map(decode_images).unwrap_or_default()
    }
}

pub fn encode_images(paths: &[String]) -> String {
    serde_json::to_string(paths).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_images(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed images_secondary payload");
            Vec::new()
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("name required".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    description: Option<&str>,
    image_main: Option<&str>,
    images_secondary: &[String],
    active: bool,
) -> Result<Model, ModelError> {
    validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
        image_main: Set(image_main.map(str::to_string)),
        images_secondary: Set(Some(encode_images(images_secondary))),
        active: Set(active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
