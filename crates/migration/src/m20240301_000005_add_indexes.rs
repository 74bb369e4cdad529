//! Lookup indexes: product/category names, product activity flag and both
//! sides of the association table.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_products_name")
                    .table(Products::Table)
                    .col(Products::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_products_active")
                    .table(Products::Table)
                    .col(Products::Active)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_categories_name")
                    .table(Categories::Table)
                    .col(Categories::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_categories_products_product")
                    .table(CategoriesProducts::Table)
                    .col(CategoriesProducts::ProductId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_categories_products_category")
                    .table(CategoriesProducts::Table)
                    .col(CategoriesProducts::CategoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_categories_products_category").table(CategoriesProducts::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_categories_products_product").table(CategoriesProducts::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_categories_name").table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_active").table(Products::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_name").table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products { Table, Name, Active }

#[derive(DeriveIden)]
enum Categories { Table, Name }

#[derive(DeriveIden)]
enum CategoriesProducts { Table, ProductId, CategoryId }
