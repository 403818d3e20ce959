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
                    .col(pk_uuid(Products::Id))
                    .col(
                        ColumnDef::new(Products::Title)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(double(Products::Price).default(0.0))
                    .col(text_null(Products::Description))
                    .col(
                        ColumnDef::new(Products::Slug)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(integer(Products::Stock).default(0))
                    .col(
                        ColumnDef::new(Products::Sizes)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(text(Products::Gender))
                    .col(
                        ColumnDef::new(Products::Tags)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'::TEXT[]")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Products {
    Table,
    Id,
    Title,
    Price,
    Description,
    Slug,
    Stock,
    Sizes,
    Gender,
    Tags,
}
