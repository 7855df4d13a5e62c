//! Create `author` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Author::Table)
                    .if_not_exists()
                    .col(pk_auto(Author::Id))
                    .col(string_len(Author::Firstname, 128))
                    .col(string_len(Author::Lastname, 128))
                    .col(text_null(Author::Bio))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Author::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Author { Table, Id, Firstname, Lastname, Bio }
