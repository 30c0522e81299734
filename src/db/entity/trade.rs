use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Binary-option style trade. `user_id` deliberately carries no foreign
/// key, matching the live schema. When `predetermined_result` is set,
/// settlement must honor it regardless of market data.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub crypto_id: String,
    pub amount: String,
    pub direction: String,
    pub entry_price: String,
    pub duration: String,
    pub status: String,
    pub created_at: Option<DateTime>,
    pub closed_at: Option<DateTime>,
    pub result: Option<String>,
    pub predetermined_result: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
