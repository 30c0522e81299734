pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240102_000001_create_bank_accounts_table;
mod m20240103_000001_create_trades_table;
mod m20240104_000001_create_transactions_table;
mod m20240105_000001_create_settings_table;
mod m20240106_000001_create_session_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240102_000001_create_bank_accounts_table::Migration),
            Box::new(m20240103_000001_create_trades_table::Migration),
            Box::new(m20240104_000001_create_transactions_table::Migration),
            Box::new(m20240105_000001_create_settings_table::Migration),
            Box::new(m20240106_000001_create_session_table::Migration)
        ]
    }
}
