//! Audit log entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(nullable)]
    pub user_id: Option<String>,

    pub table_name: String,

    #[sea_orm(nullable)]
    pub record_id: Option<String>,

    /// Action performed: create, update, delete, ...
    pub action: String,

    /// Optional JSON payload describing the change
    #[sea_orm(nullable)]
    pub details: Option<String>,

    pub timestamp: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
