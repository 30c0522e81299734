use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Deposit/withdraw request. Status transitions (`pending` ->
/// `approved` | `rejected`) are admin-driven.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub r#type: String,
    pub amount: String,
    pub fee: Option<String>,
    pub method: String,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub account_name: Option<String>,
    pub bank_account_id: Option<i32>,
    pub status: String,
    pub payment_proof: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bank_account::Entity",
        from = "Column::BankAccountId",
        to = "super::bank_account::Column::Id"
    )]
    BankAccount,
}

impl Related<super::bank_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
