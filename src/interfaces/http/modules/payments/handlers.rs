//! Payment API handlers
//!
//! The attempt flow goes through `PaymentService`; listings are read
//! models joining reservation (and, for admins, payer) summaries.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::dto::{
    InitiatePaymentRequest, InitiatePaymentResponse, PayerSummary, PaymentDto, PaymentFilter,
    ReservationSummary, VerifyPaymentRequest, VerifyPaymentResponse,
};
use crate::application::services::PaymentService;
use crate::domain::payment::PaymentStatus;
use crate::infrastructure::database::entities::{payment, reservation, user};
use crate::interfaces::http::common::{ApiResult, PageParams, Paginated, ValidatedJson};
use crate::interfaces::http::middleware::{AdminUser, CurrentUser};

#[derive(Clone)]
pub struct PaymentHandlerState {
    pub service: Arc<PaymentService>,
    pub db: DatabaseConnection,
}

async fn hydrate(
    db: &DatabaseConnection,
    rows: Vec<payment::Model>,
    include_user: bool,
) -> ApiResult<Vec<PaymentDto>> {
    let reservation_ids: Vec<i32> = rows.iter().map(|p| p.reservation_id).collect();
    let user_ids: Vec<String> = rows.iter().map(|p| p.user_id.clone()).collect();

    let reservations: HashMap<i32, reservation::Model> = reservation::Entity::find()
        .filter(reservation::Column::Id.is_in(reservation_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
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
        .map(|p| {
            let mut dto = PaymentDto::from_model(p);
            dto.reservation = reservations
                .get(&dto.reservation_id)
                .map(ReservationSummary::from_model);
            dto.user = users.get(&dto.user_id).map(PayerSummary::from_model);
            dto
        })
        .collect())
}

fn apply_filter(
    mut query: sea_orm::Select<payment::Entity>,
    filter: &PaymentFilter,
) -> sea_orm::Select<payment::Entity> {
    if let Some(status) = &filter.status {
        query = query.filter(payment::Column::Status.eq(status));
    }
    if let Some(search) = &filter.search {
        query = query.filter(payment::Column::TransactionId.eq(search));
    }
    if let Some(start_date) = filter.start_date {
        query = query.filter(payment::Column::PaymentDate.gte(start_date));
    }
    if let Some(end_date) = filter.end_date {
        query = query.filter(payment::Column::PaymentDate.lte(end_date));
    }
    query
}

#[utoipa::path(
    post,
    path = "/api/payments/initiate",
    tag = "Payments",
    request_body = InitiatePaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment attempt processed", body = InitiatePaymentResponse),
        (status = 400, description = "Reservation already paid or not priced"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn initiate_payment(
    State(state): State<PaymentHandlerState>,
    CurrentUser(current): CurrentUser,
    ValidatedJson(request): ValidatedJson<InitiatePaymentRequest>,
) -> ApiResult<Json<InitiatePaymentResponse>> {
    let payment = state
        .service
        .initiate(
            &current.user_id,
            request.reservation_id,
            &request.payment_method,
        )
        .await?;

    let message = if payment.status == PaymentStatus::Completed {
        "Payment successful"
    } else {
        "Payment failed"
    };

    Ok(Json(InitiatePaymentResponse {
        message: message.to_string(),
        payment: PaymentDto::from_domain(payment),
    }))
}

#[utoipa::path(
    post,
    path = "/api/payments/verify",
    tag = "Payments",
    request_body = VerifyPaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment record", body = VerifyPaymentResponse),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn verify_payment(
    State(state): State<PaymentHandlerState>,
    CurrentUser(_current): CurrentUser,
    ValidatedJson(request): ValidatedJson<VerifyPaymentRequest>,
) -> ApiResult<Json<VerifyPaymentResponse>> {
    let payment = state.service.verify(&request.transaction_id).await?;
    Ok(Json(VerifyPaymentResponse {
        payment: PaymentDto::from_domain(payment),
    }))
}

#[utoipa::path(
    get,
    path = "/api/payments/mine",
    tag = "Payments",
    params(PaymentFilter, PageParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own payments", body = Paginated<PaymentDto>)
    )
)]
pub async fn list_my_payments(
    State(state): State<PaymentHandlerState>,
    CurrentUser(current): CurrentUser,
    Query(filter): Query<PaymentFilter>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Paginated<PaymentDto>>> {
    let query = apply_filter(
        payment::Entity::find().filter(payment::Column::UserId.eq(&current.user_id)),
        &filter,
    );

    let total = query.clone().count(&state.db).await?;
    let rows = query
        .order_by_desc(payment::Column::PaymentDate)
        .offset(params.offset())
        .limit(params.limit())
        .all(&state.db)
        .await?;

    let data = hydrate(&state.db, rows, false).await?;
    Ok(Json(Paginated::new(total, &params, data)))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payments",
    params(PaymentFilter, PageParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All payments", body = Paginated<PaymentDto>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_all_payments(
    State(state): State<PaymentHandlerState>,
    AdminUser(_admin): AdminUser,
    Query(filter): Query<PaymentFilter>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Paginated<PaymentDto>>> {
    let query = apply_filter(payment::Entity::find(), &filter);

    let total = query.clone().count(&state.db).await?;
    let rows = query
        .order_by_desc(payment::Column::PaymentDate)
        .offset(params.offset())
        .limit(params.limit())
        .all(&state.db)
        .await?;

    let data = hydrate(&state.db, rows, true).await?;
    Ok(Json(Paginated::new(total, &params, data)))
}
