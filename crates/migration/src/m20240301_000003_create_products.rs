//! Create `products` table.
//!
//! `images_secondary` stores a JSON array of Media Store paths as text.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string_len(Products::Name, 255).not_null())
                    .col(ColumnDef::new(Products::Description).string().null())
                    .col(ColumnDef::new(Products::ImageMain).text().null())
                    .col(ColumnDef::new(Products::ImagesSecondary).text().null())
                    .col(boolean(Products::Active).not_null())
                    .col(timestamp_with_time_zone(Products::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Products::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Products { Table, Id, Name, Description, ImageMain, ImagesSecondary, Active, CreatedAt, UpdatedAt }
