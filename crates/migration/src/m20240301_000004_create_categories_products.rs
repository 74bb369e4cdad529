//! Create `categories_products` association table (product <-> category).
//! Pair uniqueness is not enforced; rows go away with either side.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CategoriesProducts::Table)
                    .if_not_exists()
                    .col(pk_auto(CategoriesProducts::Id))
                    .col(integer(CategoriesProducts::ProductId).not_null())
                    .col(integer(CategoriesProducts::CategoryId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_products_product")
                            .from(CategoriesProducts::Table, CategoriesProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_products_category")
                            .from(CategoriesProducts::Table, CategoriesProducts::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CategoriesProducts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CategoriesProducts { Table, Id, ProductId, CategoryId }

#[derive(DeriveIden)]
enum Products { Table, Id }

#[derive(DeriveIden)]
enum Categories { Table, Id }
