//! Parking slot API handlers
//!
//! Any authenticated user may list slots so the booking page can render
//! availability; mutations are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::dto::{CreateSlotRequest, SlotDto, SlotFilter, UpdateSlotRequest};
use crate::domain::slot::SlotStatus;
use crate::infrastructure::database::entities::parking_slot;
use crate::interfaces::http::common::{ApiError, ApiResult, PageParams, Paginated, ValidatedJson};
use crate::interfaces::http::middleware::AdminUser;

#[derive(Clone)]
pub struct SlotHandlerState {
    pub db: DatabaseConnection,
}

#[utoipa::path(
    get,
    path = "/api/slots",
    tag = "Parking Slots",
    params(SlotFilter, PageParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Parking slots", body = Paginated<SlotDto>)
    )
)]
pub async fn list_slots(
    State(state): State<SlotHandlerState>,
    Query(filter): Query<SlotFilter>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Paginated<SlotDto>>> {
    let mut query = parking_slot::Entity::find();
    if let Some(status) = &filter.status {
        query = query.filter(parking_slot::Column::Status.eq(status));
    }
    if let Some(search) = &filter.search {
        query = query.filter(parking_slot::Column::SlotNumber.contains(search));
    }

    let total = query.clone().count(&state.db).await?;
    let rows = query
        .order_by_asc(parking_slot::Column::Floor)
        .order_by_asc(parking_slot::Column::SlotNumber)
        .offset(params.offset())
        .limit(params.limit())
        .all(&state.db)
        .await?;

    let data = rows.into_iter().map(SlotDto::from_model).collect();
    Ok(Json(Paginated::new(total, &params, data)))
}

#[utoipa::path(
    post,
    path = "/api/slots",
    tag = "Parking Slots",
    request_body = CreateSlotRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Slot created", body = SlotDto),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Slot number already exists")
    )
)]
pub async fn create_slot(
    State(state): State<SlotHandlerState>,
    AdminUser(_admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateSlotRequest>,
) -> ApiResult<(StatusCode, Json<SlotDto>)> {
    let existing = parking_slot::Entity::find()
        .filter(parking_slot::Column::SlotNumber.eq(&request.slot_number))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::conflict("Slot number already exists"));
    }

    let now = Utc::now();
    let inserted = parking_slot::ActiveModel {
        id: NotSet,
        slot_number: Set(request.slot_number),
        floor: Set(request.floor),
        slot_type: Set(request.slot_type),
        status: Set(SlotStatus::Available.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(SlotDto::from_model(inserted))))
}

#[utoipa::path(
    put,
    path = "/api/slots/{id}",
    tag = "Parking Slots",
    params(("id" = i32, Path, description = "Slot ID")),
    request_body = UpdateSlotRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Slot updated", body = SlotDto),
        (status = 404, description = "Slot not found")
    )
)]
pub async fn update_slot(
    State(state): State<SlotHandlerState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateSlotRequest>,
) -> ApiResult<Json<SlotDto>> {
    let existing = parking_slot::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking slot not found"))?;

    if let Some(slot_number) = &request.slot_number {
        let taken = parking_slot::Entity::find()
            .filter(parking_slot::Column::SlotNumber.eq(slot_number))
            .filter(parking_slot::Column::Id.ne(id))
            .one(&state.db)
            .await?;
        if taken.is_some() {
            return Err(ApiError::conflict("Slot number already exists"));
        }
    }

    let mut active: parking_slot::ActiveModel = existing.into();
    if let Some(slot_number) = request.slot_number {
        active.slot_number = Set(slot_number);
    }
    if let Some(floor) = request.floor {
        active.floor = Set(floor);
    }
    if let Some(slot_type) = request.slot_type {
        active.slot_type = Set(slot_type);
    }
    if let Some(status) = request.status {
        // normalize through the domain status so unknown strings park
        // the slot in maintenance rather than inventing a new state
        active.status = Set(SlotStatus::parse(&status).as_str().to_string());
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(SlotDto::from_model(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/slots/{id}",
    tag = "Parking Slots",
    params(("id" = i32, Path, description = "Slot ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 404, description = "Slot not found")
    )
)]
pub async fn delete_slot(
    State(state): State<SlotHandlerState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let existing = parking_slot::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Parking slot not found"))?;

    parking_slot::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
