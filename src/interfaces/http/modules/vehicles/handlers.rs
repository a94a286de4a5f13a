//! Vehicle API handlers
//!
//! All operations are owner-scoped: a vehicle id belonging to another
//! user behaves like a missing one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleDto};
use crate::infrastructure::database::entities::vehicle;
use crate::interfaces::http::common::{ApiError, ApiResult, PageParams, Paginated, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;

#[derive(Clone)]
pub struct VehicleHandlerState {
    pub db: DatabaseConnection,
}

async fn find_owned(
    db: &DatabaseConnection,
    id: i32,
    user_id: &str,
) -> ApiResult<vehicle::Model> {
    vehicle::Entity::find_by_id(id)
        .filter(vehicle::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle not found"))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/mine",
    tag = "Vehicles",
    params(PageParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own vehicles", body = Paginated<VehicleDto>)
    )
)]
pub async fn list_my_vehicles(
    State(state): State<VehicleHandlerState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Paginated<VehicleDto>>> {
    let query = vehicle::Entity::find().filter(vehicle::Column::UserId.eq(&user.user_id));

    let total = query.clone().count(&state.db).await?;
    let rows = query
        .order_by_desc(vehicle::Column::CreatedAt)
        .offset(params.offset())
        .limit(params.limit())
        .all(&state.db)
        .await?;

    let data = rows.into_iter().map(VehicleDto::from_model).collect();
    Ok(Json(Paginated::new(total, &params, data)))
}

#[utoipa::path(
    post,
    path = "/api/vehicles",
    tag = "Vehicles",
    request_body = CreateVehicleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Vehicle registered", body = VehicleDto),
        (status = 409, description = "License plate already registered")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleHandlerState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> ApiResult<(StatusCode, Json<VehicleDto>)> {
    let existing = vehicle::Entity::find()
        .filter(vehicle::Column::LicensePlate.eq(&request.license_plate))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::conflict("License plate already registered"));
    }

    let now = Utc::now();
    let inserted = vehicle::ActiveModel {
        id: NotSet,
        user_id: Set(user.user_id),
        vehicle_type: Set(request.vehicle_type),
        license_plate: Set(request.license_plate),
        brand: Set(request.brand),
        model: Set(request.model),
        color: Set(request.color),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(VehicleDto::from_model(inserted))))
}

#[utoipa::path(
    put,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vehicle updated", body = VehicleDto),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleHandlerState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> ApiResult<Json<VehicleDto>> {
    let existing = find_owned(&state.db, id, &user.user_id).await?;

    if let Some(plate) = &request.license_plate {
        let taken = vehicle::Entity::find()
            .filter(vehicle::Column::LicensePlate.eq(plate))
            .filter(vehicle::Column::Id.ne(id))
            .one(&state.db)
            .await?;
        if taken.is_some() {
            return Err(ApiError::conflict("License plate already registered"));
        }
    }

    let mut active: vehicle::ActiveModel = existing.into();
    if let Some(vehicle_type) = request.vehicle_type {
        active.vehicle_type = Set(vehicle_type);
    }
    if let Some(license_plate) = request.license_plate {
        active.license_plate = Set(license_plate);
    }
    if request.brand.is_some() {
        active.brand = Set(request.brand);
    }
    if request.model.is_some() {
        active.model = Set(request.model);
    }
    if request.color.is_some() {
        active.color = Set(request.color);
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(VehicleDto::from_model(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn delete_vehicle(
    State(state): State<VehicleHandlerState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let existing = find_owned(&state.db, id, &user.user_id).await?;
    vehicle::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
