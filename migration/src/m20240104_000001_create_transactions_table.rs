use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Transactions::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Transactions::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(Transactions::UserId).integer().not_null())
                .col(ColumnDef::new(Transactions::Type).text().not_null())
                .col(ColumnDef::new(Transactions::Amount).text().not_null())
                .col(ColumnDef::new(Transactions::Fee).text().null())
                .col(ColumnDef::new(Transactions::Method).text().not_null())
                .col(ColumnDef::new(Transactions::BankName).text().null())
                .col(ColumnDef::new(Transactions::BankAccount).text().null())
                .col(ColumnDef::new(Transactions::AccountName).text().null())
                .col(ColumnDef::new(Transactions::BankAccountId).integer().null())
                .col(ColumnDef::new(Transactions::Status).text().not_null().default("pending"))
                .col(ColumnDef::new(Transactions::PaymentProof).text().null())
                .col(ColumnDef::new(Transactions::Note).text().null())
                .col(
                    ColumnDef::new(Transactions::CreatedAt)
                        .timestamp()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .col(
                    ColumnDef::new(Transactions::UpdatedAt)
                        .timestamp()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_transactions_bank_account")
                        .from(Transactions::Table, Transactions::BankAccountId)
                        .to(BankAccounts::Table, BankAccounts::Id)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_transactions_user_id")
                .table(Transactions::Table)
                .col(Transactions::UserId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_transactions_status")
                .table(Transactions::Table)
                .col(Transactions::Status)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Transactions::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Type,
    Amount,
    Fee,
    Method,
    BankName,
    BankAccount,
    AccountName,
    BankAccountId,
    Status,
    PaymentProof,
    Note,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BankAccounts {
    Table,
    Id,
}
