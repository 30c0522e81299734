use serde::{ Deserialize, Serialize };
use serde_json::Value as JsonValue;

use crate::registry::TableName;

/// On-disk layout of one backup file: a mapping from table name to the
/// rows captured for it. Fields sit in registry order so the written
/// document reads parent-before-child. A table absent from the
/// document restores to empty rather than erroring.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<JsonValue>,
    #[serde(default)]
    pub settings: Vec<JsonValue>,
    #[serde(default)]
    pub session: Vec<JsonValue>,
    #[serde(default)]
    pub bank_accounts: Vec<JsonValue>,
    #[serde(default)]
    pub trades: Vec<JsonValue>,
    #[serde(default)]
    pub transactions: Vec<JsonValue>,
}

impl Snapshot {
    pub fn rows(&self, table: TableName) -> &[JsonValue] {
        match table {
            TableName::Users => &self.users,
            TableName::Settings => &self.settings,
            TableName::Session => &self.session,
            TableName::BankAccounts => &self.bank_accounts,
            TableName::Trades => &self.trades,
            TableName::Transactions => &self.transactions,
        }
    }

    pub fn set_rows(&mut self, table: TableName, rows: Vec<JsonValue>) {
        match table {
            TableName::Users => self.users = rows,
            TableName::Settings => self.settings = rows,
            TableName::Session => self.session = rows,
            TableName::BankAccounts => self.bank_accounts = rows,
            TableName::Trades => self.trades = rows,
            TableName::Transactions => self.transactions = rows,
        }
    }

    pub fn total_rows(&self) -> usize {
        crate::registry::REGISTRY.iter()
            .map(|t| self.rows(*t).len())
            .sum()
    }
}
