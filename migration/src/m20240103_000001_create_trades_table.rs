use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Trades::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Trades::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                // user_id intentionally carries no foreign key,
                // matching the live schema
                .col(ColumnDef::new(Trades::UserId).integer().not_null())
                .col(ColumnDef::new(Trades::CryptoId).text().not_null())
                .col(ColumnDef::new(Trades::Amount).text().not_null())
                .col(ColumnDef::new(Trades::Direction).text().not_null())
                .col(ColumnDef::new(Trades::EntryPrice).text().not_null())
                .col(ColumnDef::new(Trades::Duration).text().not_null())
                .col(ColumnDef::new(Trades::Status).text().not_null().default("active"))
                .col(
                    ColumnDef::new(Trades::CreatedAt)
                        .timestamp()
                        .null()
                        .default(Expr::current_timestamp())
                )
                .col(ColumnDef::new(Trades::ClosedAt).timestamp().null())
                .col(ColumnDef::new(Trades::Result).text().null())
                .col(ColumnDef::new(Trades::PredeterminedResult).text().null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_trades_user_id")
                .table(Trades::Table)
                .col(Trades::UserId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Trades::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Trades {
    Table,
    Id,
    UserId,
    CryptoId,
    Amount,
    Direction,
    EntryPrice,
    Duration,
    Status,
    CreatedAt,
    ClosedAt,
    Result,
    PredeterminedResult,
}
