//! Audit log API handlers (admin-only)

use axum::extract::{Path, Query, State};
use axum::Json;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::dto::{AuditLogDto, AuditLogPage, AuditSearchParams};
use crate::infrastructure::database::entities::audit_log;
use crate::interfaces::http::common::{ApiResult, PageParams};
use crate::interfaces::http::middleware::AdminUser;

#[derive(Clone)]
pub struct AuditHandlerState {
    pub db: DatabaseConnection,
}

async fn page_of(
    db: &DatabaseConnection,
    query: sea_orm::Select<audit_log::Entity>,
    params: &PageParams,
) -> ApiResult<AuditLogPage> {
    let total = query.clone().count(db).await?;
    let rows = query
        .order_by_desc(audit_log::Column::Timestamp)
        .offset(params.offset())
        .limit(params.limit())
        .all(db)
        .await?;

    Ok(AuditLogPage {
        total,
        page: params.page(),
        total_pages: total.div_ceil(params.limit()),
        logs: rows.into_iter().map(AuditLogDto::from_model).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/api/audit-logs",
    tag = "Audit Logs",
    params(PageParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All audit logs", body = AuditLogPage),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_all_logs(
    State(state): State<AuditHandlerState>,
    AdminUser(_admin): AdminUser,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<AuditLogPage>> {
    let page = page_of(&state.db, audit_log::Entity::find(), &params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/audit-logs/table/{tableName}",
    tag = "Audit Logs",
    params(
        ("tableName" = String, Path, description = "Table name"),
        PageParams
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logs for a table", body = AuditLogPage),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_table_logs(
    State(state): State<AuditHandlerState>,
    AdminUser(_admin): AdminUser,
    Path(table_name): Path<String>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<AuditLogPage>> {
    let query = audit_log::Entity::find().filter(audit_log::Column::TableName.eq(&table_name));
    let page = page_of(&state.db, query, &params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/audit-logs/record/{tableName}/{recordId}",
    tag = "Audit Logs",
    params(
        ("tableName" = String, Path, description = "Table name"),
        ("recordId" = String, Path, description = "Record ID"),
        PageParams
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logs for a record", body = AuditLogPage),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_record_logs(
    State(state): State<AuditHandlerState>,
    AdminUser(_admin): AdminUser,
    Path((table_name, record_id)): Path<(String, String)>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<AuditLogPage>> {
    let query = audit_log::Entity::find()
        .filter(audit_log::Column::TableName.eq(&table_name))
        .filter(audit_log::Column::RecordId.eq(&record_id));
    let page = page_of(&state.db, query, &params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/audit-logs/search",
    tag = "Audit Logs",
    params(AuditSearchParams, PageParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching audit logs", body = AuditLogPage),
        (status = 403, description = "Admin only")
    )
)]
pub async fn search_logs(
    State(state): State<AuditHandlerState>,
    AdminUser(_admin): AdminUser,
    Query(search): Query<AuditSearchParams>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<AuditLogPage>> {
    let mut query = audit_log::Entity::find();
    if let Some(table_name) = &search.table_name {
        query = query.filter(audit_log::Column::TableName.eq(table_name));
    }
    if let Some(action) = &search.action {
        query = query.filter(audit_log::Column::Action.eq(action));
    }
    if let Some(user_id) = &search.user_id {
        query = query.filter(audit_log::Column::UserId.eq(user_id));
    }
    if let Some(start_date) = search.start_date {
        query = query.filter(audit_log::Column::Timestamp.gte(start_date));
    }
    if let Some(end_date) = search.end_date {
        query = query.filter(audit_log::Column::Timestamp.lte(end_date));
    }

    let page = page_of(&state.db, query, &params).await?;
    Ok(Json(page))
}
