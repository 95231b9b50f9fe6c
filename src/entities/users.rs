use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Account status. Stored only; no endpoint transitions it.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[sea_orm(string_value = "active")]
    Active,

    #[sea_orm(string_value = "inactive")]
    Inactive,

    #[sea_orm(string_value = "banned")]
    Banned,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Exact-match login identifier, no case normalization.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id PHC string (salt and params embedded)
    pub password_hash: String,

    pub status: UserStatus,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
