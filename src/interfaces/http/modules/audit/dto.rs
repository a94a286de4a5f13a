//! Audit log DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::infrastructure::database::entities::audit_log;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogDto {
    pub id: i32,
    pub user_id: Option<String>,
    pub table_name: String,
    pub record_id: Option<String>,
    pub action: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AuditLogDto {
    pub fn from_model(m: audit_log::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            table_name: m.table_name,
            record_id: m.record_id,
            action: m.action,
            details: m.details,
            timestamp: m.timestamp,
        }
    }
}

/// Audit listings answer `{total, page, totalPages, logs}`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogPage {
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
    pub logs: Vec<AuditLogDto>,
}

/// Search filters; equality on table/action/user, inclusive date range
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AuditSearchParams {
    pub table_name: Option<String>,
    pub action: Option<String>,
    pub user_id: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
