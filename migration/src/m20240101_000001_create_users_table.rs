use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Users::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Users::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(Users::Username).text().not_null())
                .col(ColumnDef::new(Users::Password).text().not_null())
                .col(ColumnDef::new(Users::Email).text().not_null())
                .col(ColumnDef::new(Users::FullName).text().not_null())
                .col(ColumnDef::new(Users::Role).text().not_null().default("user"))
                .col(ColumnDef::new(Users::Balance).text().not_null().default("0"))
                .col(ColumnDef::new(Users::DisplayName).text().null())
                .col(ColumnDef::new(Users::PhoneNumber).text().null())
                .col(ColumnDef::new(Users::AvatarUrl).text().null())
                .col(
                    ColumnDef::new(Users::CreatedAt)
                        .timestamp()
                        .null()
                        .default(Expr::current_timestamp())
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_users_username")
                .table(Users::Table)
                .col(Users::Username)
                .unique()
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_users_email")
                .table(Users::Table)
                .col(Users::Email)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Password,
    Email,
    FullName,
    Role,
    Balance,
    DisplayName,
    PhoneNumber,
    AvatarUrl,
    CreatedAt,
}
