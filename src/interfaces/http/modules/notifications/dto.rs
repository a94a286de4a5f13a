//! Notification DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::database::entities::notification;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: i32,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationDto {
    pub fn from_model(m: notification::Model) -> Self {
        Self {
            id: m.id,
            message: m.message,
            kind: m.kind,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkReadResponse {
    pub message: String,
}
