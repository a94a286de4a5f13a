//! Reservation API handlers
//!
//! Lifecycle transitions go through `ReservationService`; the listings
//! are read models that query the entities directly and embed slot,
//! vehicle and (for admins) owner summaries.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::dto::{
    AcknowledgeResponse, CreateReservationRequest, ReservationActionResponse, ReservationDto,
    ReservationFilter, SlotSummary, UserSummary, VehicleSummary,
};
use crate::application::services::ReservationService;
use crate::infrastructure::database::entities::{parking_slot, reservation, user, vehicle};
use crate::interfaces::http::common::{ApiResult, PageParams, Paginated, ValidatedJson};
use crate::interfaces::http::middleware::{AdminUser, CurrentUser};

#[derive(Clone)]
pub struct ReservationHandlerState {
    pub service: Arc<ReservationService>,
    pub db: DatabaseConnection,
}

// ── Read-model hydration ───────────────────────────────────────

async fn hydrate(
    db: &DatabaseConnection,
    rows: Vec<reservation::Model>,
    include_user: bool,
) -> ApiResult<Vec<ReservationDto>> {
    let slot_ids: Vec<i32> = rows.iter().map(|r| r.slot_id).collect();
    let vehicle_ids: Vec<i32> = rows.iter().map(|r| r.vehicle_id).collect();
    let user_ids: Vec<String> = rows.iter().map(|r| r.user_id.clone()).collect();

    let slots: HashMap<i32, parking_slot::Model> = parking_slot::Entity::find()
        .filter(parking_slot::Column::Id.is_in(slot_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let vehicles: HashMap<i32, vehicle::Model> = vehicle::Entity::find()
        .filter(vehicle::Column::Id.is_in(vehicle_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|v| (v.id, v))
        .collect();

    let users: HashMap<String, user::Model> = if include_user {
        user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect()
    } else {
        HashMap::new()
    };

    Ok(rows
        .into_iter()
        .map(|r| {
            let slot = slots.get(&r.slot_id).map(SlotSummary::from_model);
            let vehicle = vehicles.get(&r.vehicle_id).map(VehicleSummary::from_model);
            let owner = users.get(&r.user_id).map(UserSummary::from_model);
            ReservationDto {
                id: r.id,
                user_id: r.user_id,
                slot_id: r.slot_id,
                vehicle_id: r.vehicle_id,
                start_time: r.start_time,
                end_time: r.end_time,
                status: r.status,
                total_price: r.total_price,
                created_at: r.created_at,
                slot,
                vehicle,
                user: owner,
            }
        })
        .collect())
}

async fn with_slot(
    db: &DatabaseConnection,
    mut dto: ReservationDto,
) -> ApiResult<ReservationDto> {
    let slot = parking_slot::Entity::find_by_id(dto.slot_id).one(db).await?;
    dto.slot = slot.as_ref().map(SlotSummary::from_model);
    Ok(dto)
}

// ── Handlers ───────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Reservation created", body = ReservationDto),
        (status = 400, description = "Invalid time range"),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Slot unavailable or interval conflict")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationHandlerState>,
    CurrentUser(current): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<ReservationDto>)> {
    let reservation = state
        .service
        .create(
            &current.user_id,
            request.slot_id,
            request.vehicle_id,
            request.start_time,
            request.end_time,
        )
        .await?;

    let dto = with_slot(&state.db, ReservationDto::from_domain(reservation)).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/reservations/mine",
    tag = "Reservations",
    params(ReservationFilter, PageParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own reservations", body = Paginated<ReservationDto>)
    )
)]
pub async fn list_my_reservations(
    State(state): State<ReservationHandlerState>,
    CurrentUser(current): CurrentUser,
    Query(filter): Query<ReservationFilter>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Paginated<ReservationDto>>> {
    let mut query =
        reservation::Entity::find().filter(reservation::Column::UserId.eq(&current.user_id));
    if let Some(status) = &filter.status {
        query = query.filter(reservation::Column::Status.eq(status));
    }

    let total = query.clone().count(&state.db).await?;
    let rows = query
        .order_by_desc(reservation::Column::CreatedAt)
        .offset(params.offset())
        .limit(params.limit())
        .all(&state.db)
        .await?;

    let data = hydrate(&state.db, rows, false).await?;
    Ok(Json(Paginated::new(total, &params, data)))
}

#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = "Reservations",
    params(ReservationFilter, PageParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All reservations", body = Paginated<ReservationDto>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_all_reservations(
    State(state): State<ReservationHandlerState>,
    AdminUser(_admin): AdminUser,
    Query(filter): Query<ReservationFilter>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Paginated<ReservationDto>>> {
    let mut query = reservation::Entity::find();
    if let Some(status) = &filter.status {
        query = query.filter(reservation::Column::Status.eq(status));
    }
    if let Some(start_date) = filter.start_date {
        query = query.filter(reservation::Column::StartTime.gte(start_date));
    }
    if let Some(end_date) = filter.end_date {
        query = query.filter(reservation::Column::StartTime.lte(end_date));
    }

    let total = query.clone().count(&state.db).await?;
    let rows = query
        .order_by_desc(reservation::Column::CreatedAt)
        .offset(params.offset())
        .limit(params.limit())
        .all(&state.db)
        .await?;

    let data = hydrate(&state.db, rows, true).await?;
    Ok(Json(Paginated::new(total, &params, data)))
}

#[utoipa::path(
    patch,
    path = "/api/reservations/{id}/acknowledge",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reservation acknowledged", body = AcknowledgeResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn acknowledge_reservation(
    State(state): State<ReservationHandlerState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<AcknowledgeResponse>> {
    let (reservation, ticket) = state.service.acknowledge(id).await?;
    let dto = with_slot(&state.db, ReservationDto::from_domain(reservation)).await?;

    Ok(Json(AcknowledgeResponse {
        message: "Reservation acknowledged".to_string(),
        reservation: dto,
        ticket: ticket.into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/reservations/{id}/revoke",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reservation revoked", body = ReservationActionResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn revoke_reservation(
    State(state): State<ReservationHandlerState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<ReservationActionResponse>> {
    let reservation = state.service.revoke(id).await?;

    Ok(Json(ReservationActionResponse {
        message: "Reservation revoked".to_string(),
        reservation: ReservationDto::from_domain(reservation),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/reservations/{id}/cancel",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationActionResponse),
        (status = 404, description = "Reservation not found or not owned")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationHandlerState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<ReservationActionResponse>> {
    let reservation = state.service.cancel(id, &current.user_id).await?;
    let dto = with_slot(&state.db, ReservationDto::from_domain(reservation)).await?;

    Ok(Json(ReservationActionResponse {
        message: "Reservation cancelled successfully".to_string(),
        reservation: dto,
    }))
}
