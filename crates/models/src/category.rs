use sea_orm::{entity::prelude::*, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{category_product, errors::ModelError, product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
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

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { category_product::Relation::Product.def() }

    fn via() -> Option<RelationDef> { Some(category_product::Relation::Category.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("name required".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    description: Option<&str>,
    image: Option<&str>,
) -> Result<Model, ModelError> {
    validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
        image: Set(image.map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Existing categories among `ids`; unknown ids are simply absent from the result.
pub async fn find_existing<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<Vec<Model>, ModelError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Entity::find().filter(Column::Id.is_in(ids.iter().copied())).all(db).await?)
}
