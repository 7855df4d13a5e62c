//! Create `book` table with FK to `author`.
//!
//! Books reference their author by id; deleting an author removes its books.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(pk_auto(Book::Id))
                    .col(string_len(Book::Title, 256))
                    .col(integer_null(Book::Year))
                    .col(string_len(Book::Isbn, 32))
                    .col(text_null(Book::Summary))
                    .col(string_len_null(Book::Image, 512))
                    .col(double_null(Book::Price))
                    .col(integer(Book::AuthorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_author")
                            .from(Book::Table, Book::AuthorId)
                            .to(Author::Table, Author::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Book::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Book { Table, Id, Title, Year, Isbn, Summary, Image, Price, AuthorId }

#[derive(DeriveIden)]
enum Author { Table, Id }
