//! Join rows between products and categories.
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::{category, errors::ModelError, product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories_products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Product, Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::belongs_to(product::Entity)
                .from(Column::ProductId)
                .to(product::Column::Id)
                .into(),
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Product.def() }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Drop every association of `product_id` and attach `category_ids` instead.
pub async fn replace_for_product<C: ConnectionTrait>(db: &C, product_id: i32, category_ids: &[i32]) -> Result<(), ModelError> {
    delete_for_product(db, product_id).await?;
    if category_ids.is_empty() {
        return Ok(());
    }
    let rows = category_ids.iter().map(|&category_id| ActiveModel {
        product_id: Set(product_id),
        category_id: Set(category_id),
        ..Default::default()
    });
    Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

pub async fn delete_for_product<C: ConnectionTrait>(db: &C, product_id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_many().filter(Column::ProductId.eq(product_id)).exec(db).await?;
    Ok(res.rows_affected)
}

pub async fn delete_for_category<C: ConnectionTrait>(db: &C, category_id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_many().filter(Column::CategoryId.eq(category_id)).exec(db).await?;
    Ok(res.rows_affected)
}
