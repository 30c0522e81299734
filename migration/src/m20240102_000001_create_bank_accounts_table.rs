use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(BankAccounts::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(BankAccounts::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(BankAccounts::UserId).integer().not_null())
                .col(ColumnDef::new(BankAccounts::BankName).text().not_null())
                .col(ColumnDef::new(BankAccounts::AccountNumber).text().not_null())
                .col(ColumnDef::new(BankAccounts::AccountName).text().not_null())
                .col(
                    ColumnDef::new(BankAccounts::IsDefault)
                        .boolean()
                        .not_null()
                        .default(false)
                )
                .col(
                    ColumnDef::new(BankAccounts::CreatedAt)
                        .timestamp()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .col(
                    ColumnDef::new(BankAccounts::UpdatedAt)
                        .timestamp()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_bank_accounts_user")
                        .from(BankAccounts::Table, BankAccounts::UserId)
                        .to(Users::Table, Users::Id)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_bank_accounts_user_id")
                .table(BankAccounts::Table)
                .col(BankAccounts::UserId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BankAccounts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BankAccounts {
    Table,
    Id,
    UserId,
    BankName,
    AccountNumber,
    AccountName,
    IsDefault,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
