use sea_orm::{ ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel };
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::db::entity;
use crate::error::Result;

/// One of the six tables participating in backup/restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableName {
    Users,
    Settings,
    Session,
    BankAccounts,
    Trades,
    Transactions,
}

/// Single source of truth for the tables covered by backup/restore,
/// ordered parent-before-child: inserts walk this sequence forward,
/// deletes walk it in exact reverse (children first, so the
/// transactions -> bank_accounts -> users foreign-key chain never
/// breaks). `session` carries no foreign key and only needs to be
/// present somewhere in the sequence.
pub const REGISTRY: [TableName; 6] = [
    TableName::Users,
    TableName::Settings,
    TableName::Session,
    TableName::BankAccounts,
    TableName::Trades,
    TableName::Transactions,
];

impl TableName {
    pub fn as_str(self) -> &'static str {
        match self {
            TableName::Users => "users",
            TableName::Settings => "settings",
            TableName::Session => "session",
            TableName::BankAccounts => "bank_accounts",
            TableName::Trades => "trades",
            TableName::Transactions => "transactions",
        }
    }

    /// Read every row of the table as raw JSON objects keyed by the
    /// database column names, in driver iteration order.
    pub async fn dump<C: ConnectionTrait>(self, db: &C) -> Result<Vec<JsonValue>> {
        match self {
            TableName::Users => dump_rows::<entity::User, C>(db).await,
            TableName::Settings => dump_rows::<entity::Setting, C>(db).await,
            TableName::Session => dump_rows::<entity::Session, C>(db).await,
            TableName::BankAccounts => dump_rows::<entity::BankAccount, C>(db).await,
            TableName::Trades => dump_rows::<entity::Trade, C>(db).await,
            TableName::Transactions => dump_rows::<entity::Transaction, C>(db).await,
        }
    }

    /// Delete every row of the table.
    pub async fn wipe<C: ConnectionTrait>(self, db: &C) -> Result<u64> {
        match self {
            TableName::Users => wipe_rows::<entity::User, C>(db).await,
            TableName::Settings => wipe_rows::<entity::Setting, C>(db).await,
            TableName::Session => wipe_rows::<entity::Session, C>(db).await,
            TableName::BankAccounts => wipe_rows::<entity::BankAccount, C>(db).await,
            TableName::Trades => wipe_rows::<entity::Trade, C>(db).await,
            TableName::Transactions => wipe_rows::<entity::Transaction, C>(db).await,
        }
    }

    /// Insert captured rows one at a time, preserving every column
    /// exactly as dumped, primary keys included, in the captured order.
    pub async fn load<C: ConnectionTrait>(self, db: &C, rows: &[JsonValue]) -> Result<u64> {
        match self {
            TableName::Users => load_rows::<entity::user::ActiveModel, C>(db, rows).await,
            TableName::Settings => load_rows::<entity::setting::ActiveModel, C>(db, rows).await,
            TableName::Session => load_rows::<entity::session::ActiveModel, C>(db, rows).await,
            TableName::BankAccounts => {
                load_rows::<entity::bank_account::ActiveModel, C>(db, rows).await
            }
            TableName::Trades => load_rows::<entity::trade::ActiveModel, C>(db, rows).await,
            TableName::Transactions => {
                load_rows::<entity::transaction::ActiveModel, C>(db, rows).await
            }
        }
    }
}

async fn dump_rows<E, C>(db: &C) -> Result<Vec<JsonValue>>
    where E: EntityTrait, E::Model: Serialize, C: ConnectionTrait
{
    let mut rows = Vec::new();
    for model in E::find().all(db).await? {
        rows.push(serde_json::to_value(model)?);
    }

    Ok(rows)
}

async fn wipe_rows<E: EntityTrait, C: ConnectionTrait>(db: &C) -> Result<u64> {
    let res = E::delete_many().exec(db).await?;
    Ok(res.rows_affected)
}

async fn load_rows<A, C>(db: &C, rows: &[JsonValue]) -> Result<u64>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        <A::Entity as EntityTrait>::Model: DeserializeOwned + IntoActiveModel<A>,
        C: ConnectionTrait
{
    for row in rows {
        let model = A::from_json(row.clone())?;
        model.insert(db).await?;
    }

    Ok(rows.len() as u64)
}
