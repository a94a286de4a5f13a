//! Notification API handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::dto::{MarkReadResponse, NotificationDto};
use crate::infrastructure::database::entities::notification;
use crate::interfaces::http::common::{ApiError, ApiResult, PageParams, Paginated};
use crate::interfaces::http::middleware::CurrentUser;

#[derive(Clone)]
pub struct NotificationHandlerState {
    pub db: DatabaseConnection,
}

#[utoipa::path(
    get,
    path = "/api/notifications/mine",
    tag = "Notifications",
    params(PageParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own notifications", body = Paginated<NotificationDto>)
    )
)]
pub async fn list_my_notifications(
    State(state): State<NotificationHandlerState>,
    CurrentUser(current): CurrentUser,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Paginated<NotificationDto>>> {
    let query =
        notification::Entity::find().filter(notification::Column::UserId.eq(&current.user_id));

    let total = query.clone().count(&state.db).await?;
    let rows = query
        .order_by_desc(notification::Column::CreatedAt)
        .offset(params.offset())
        .limit(params.limit())
        .all(&state.db)
        .await?;

    let data = rows.into_iter().map(NotificationDto::from_model).collect();
    Ok(Json(Paginated::new(total, &params, data)))
}

#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = i32, Path, description = "Notification ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notification marked as read", body = MarkReadResponse),
        (status = 403, description = "Not the recipient"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_as_read(
    State(state): State<NotificationHandlerState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<MarkReadResponse>> {
    // NotFound before Forbidden: the row must exist to judge ownership
    let existing = notification::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Notification not found"))?;

    if existing.user_id != current.user_id {
        return Err(ApiError::forbidden(
            "Not authorized to update this notification",
        ));
    }

    let mut active: notification::ActiveModel = existing.into();
    active.is_read = Set(true);
    active.update(&state.db).await?;

    Ok(Json(MarkReadResponse {
        message: "Notification marked as read".to_string(),
    }))
}
