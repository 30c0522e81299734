use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Session::Table)
                .if_not_exists()
                .col(ColumnDef::new(Session::Sid).string().not_null().primary_key())
                .col(ColumnDef::new(Session::Sess).json().not_null())
                .col(ColumnDef::new(Session::Expire).timestamp().not_null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_session_expire")
                .table(Session::Table)
                .col(Session::Expire)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Session::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Session {
    Table,
    Sid,
    Sess,
    Expire,
}
