use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Book: lookup by author
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_book_author")
                    .table(Book::Table)
                    .col(Book::AuthorId)
                    .to_owned(),
            )
            .await?;

        // UserRole: composite unique (user_id, role)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_user_role_user_role")
                    .table(UserRole::Table)
                    .col(UserRole::UserId)
                    .col(UserRole::Role)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_user_role_user_role").table(UserRole::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_book_author").table(Book::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Book { Table, AuthorId }

#[derive(DeriveIden)]
enum UserRole { Table, UserId, Role }
