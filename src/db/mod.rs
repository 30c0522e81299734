use sea_orm::{
    ActiveModelTrait,
    ActiveValue::NotSet,
    ColumnTrait,
    Database,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    Set,
    TransactionTrait,
};
use sea_orm::sea_query::Expr;

use crate::error::{ AppError, Result };

pub mod entity;
pub use entity::*;

/// Open a connection pool for one script invocation. Each maintenance
/// binary opens its own handle and releases it via process teardown.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    Ok(db)
}

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        username: String,
        password_hash: String,
        email: String,
        full_name: String,
        role: String,
        balance: String
    ) -> Result<user::Model> {
        let user = user::ActiveModel {
            id: NotSet,
            username: Set(username),
            password: Set(password_hash),
            email: Set(email),
            full_name: Set(full_name),
            role: Set(role),
            balance: Set(balance),
            display_name: Set(None),
            phone_number: Set(None),
            avatar_url: Set(None),
            created_at: Set(Some(chrono::Utc::now().naive_utc())),
        };

        let user = user.insert(&self.db).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        let user = entity::User
            ::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db).await?;

        Ok(user)
    }
}

pub struct SettingRepository {
    db: DatabaseConnection,
}

impl SettingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, key: &str) -> Result<Option<setting::Model>> {
        let setting = entity::Setting
            ::find()
            .filter(setting::Column::Key.eq(key))
            .one(&self.db).await?;

        Ok(setting)
    }

    /// Insert the key or overwrite its value, refreshing `updated_at`.
    pub async fn upsert(&self, key: &str, value: &str) -> Result<setting::Model> {
        let now = chrono::Utc::now().naive_utc();

        if let Some(existing) = self.get(key).await? {
            let mut active: setting::ActiveModel = existing.into();
            active.value = Set(Some(value.to_string()));
            active.updated_at = Set(now);

            let updated = active.update(&self.db).await?;
            return Ok(updated);
        }

        let setting = setting::ActiveModel {
            id: NotSet,
            key: Set(key.to_string()),
            value: Set(Some(value.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let setting = setting.insert(&self.db).await?;
        Ok(setting)
    }
}

pub struct BankAccountRepository {
    db: DatabaseConnection,
}

impl BankAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        bank_name: String,
        account_number: String,
        account_name: String,
        is_default: bool
    ) -> Result<bank_account::Model> {
        let now = chrono::Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        if is_default {
            Self::clear_defaults(&txn, user_id).await?;
        }

        let account = bank_account::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            bank_name: Set(bank_name),
            account_number: Set(account_number),
            account_name: Set(account_name),
            is_default: Set(is_default),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&txn).await?;
        txn.commit().await?;

        Ok(account)
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<bank_account::Model>> {
        let accounts = entity::BankAccount
            ::find()
            .filter(bank_account::Column::UserId.eq(user_id))
            .all(&self.db).await?;

        Ok(accounts)
    }

    /// Flag one account as the user's withdrawal default. Sibling rows
    /// are cleared and the target flagged inside a single transaction
    /// so the one-default-per-user invariant holds even across a crash.
    pub async fn set_default(&self, user_id: i32, account_id: i32) -> Result<bank_account::Model> {
        let txn = self.db.begin().await?;

        let account = entity::BankAccount
            ::find_by_id(account_id)
            .one(&txn).await?
            .filter(|a| a.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Bank account {} not found", account_id)))?;

        Self::clear_defaults(&txn, user_id).await?;

        let mut active: bank_account::ActiveModel = account.into();
        active.is_default = Set(true);
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let account = active.update(&txn).await?;
        txn.commit().await?;

        Ok(account)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        entity::BankAccount::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn clear_defaults<C: sea_orm::ConnectionTrait>(db: &C, user_id: i32) -> Result<()> {
        entity::BankAccount
            ::update_many()
            .col_expr(bank_account::Column::IsDefault, Expr::value(false))
            .col_expr(
                bank_account::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().naive_utc())
            )
            .filter(bank_account::Column::UserId.eq(user_id))
            .filter(bank_account::Column::IsDefault.eq(true))
            .exec(db).await?;

        Ok(())
    }
}
