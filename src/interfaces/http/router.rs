//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{PaymentService, ReservationService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ErrorBody, Paginated};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    analytics, audit, auth, health, notifications, payments, reservations, slots, vehicles,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::get_current_user,
        // Vehicles
        vehicles::handlers::list_my_vehicles,
        vehicles::handlers::create_vehicle,
        vehicles::handlers::update_vehicle,
        vehicles::handlers::delete_vehicle,
        // Parking slots
        slots::handlers::list_slots,
        slots::handlers::create_slot,
        slots::handlers::update_slot,
        slots::handlers::delete_slot,
        // Reservations
        reservations::handlers::create_reservation,
        reservations::handlers::list_my_reservations,
        reservations::handlers::list_all_reservations,
        reservations::handlers::acknowledge_reservation,
        reservations::handlers::revoke_reservation,
        reservations::handlers::cancel_reservation,
        // Payments
        payments::handlers::initiate_payment,
        payments::handlers::verify_payment,
        payments::handlers::list_my_payments,
        payments::handlers::list_all_payments,
        // Notifications
        notifications::handlers::list_my_notifications,
        notifications::handlers::mark_as_read,
        // Audit logs
        audit::handlers::list_all_logs,
        audit::handlers::list_table_logs,
        audit::handlers::list_record_logs,
        audit::handlers::search_logs,
        // Analytics
        analytics::handlers::dashboard_stats,
    ),
    components(
        schemas(
            // Common
            ErrorBody,
            health::handlers::HealthResponse,
            // Auth
            auth::dto::RegisterRequest,
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::UserInfo,
            // Vehicles
            vehicles::dto::CreateVehicleRequest,
            vehicles::dto::UpdateVehicleRequest,
            vehicles::dto::VehicleDto,
            Paginated<vehicles::dto::VehicleDto>,
            // Parking slots
            slots::dto::CreateSlotRequest,
            slots::dto::UpdateSlotRequest,
            slots::dto::SlotDto,
            Paginated<slots::dto::SlotDto>,
            // Reservations
            reservations::dto::CreateReservationRequest,
            reservations::dto::ReservationDto,
            reservations::dto::SlotSummary,
            reservations::dto::VehicleSummary,
            reservations::dto::UserSummary,
            reservations::dto::TicketDto,
            reservations::dto::AcknowledgeResponse,
            reservations::dto::ReservationActionResponse,
            Paginated<reservations::dto::ReservationDto>,
            // Payments
            payments::dto::InitiatePaymentRequest,
            payments::dto::VerifyPaymentRequest,
            payments::dto::PaymentDto,
            payments::dto::ReservationSummary,
            payments::dto::PayerSummary,
            payments::dto::InitiatePaymentResponse,
            payments::dto::VerifyPaymentResponse,
            Paginated<payments::dto::PaymentDto>,
            // Notifications
            notifications::dto::NotificationDto,
            notifications::dto::MarkReadResponse,
            Paginated<notifications::dto::NotificationDto>,
            // Audit logs
            audit::dto::AuditLogDto,
            audit::dto::AuditLogPage,
            // Analytics
            analytics::dto::DashboardStats,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User registration, login (JWT) and profile"),
        (name = "Vehicles", description = "Owner-scoped vehicle management"),
        (name = "Parking Slots", description = "Parking slot inventory and availability"),
        (name = "Reservations", description = "Reservation lifecycle: create, acknowledge, cancel, revoke"),
        (name = "Payments", description = "Payment attempts and verification"),
        (name = "Notifications", description = "Per-user notification feed"),
        (name = "Audit Logs", description = "Audit trail search (admin)"),
        (name = "Analytics", description = "Dashboard aggregates (admin)"),
    ),
    info(
        title = "ParkPoint API",
        version = "1.0.0",
        description = "REST API for the ParkPoint parking vehicle management system",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    reservation_service: Arc<ReservationService>,
    payment_service: Arc<PaymentService>,
) -> Router {
    let auth_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_handler_state = auth::handlers::AuthHandlerState {
        db: db.clone(),
        jwt_config,
    };
    let auth_public_routes = Router::new()
        .route("/register", post(auth::handlers::register))
        .route("/login", post(auth::handlers::login))
        .with_state(auth_handler_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::handlers::get_current_user))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_handler_state);

    // Vehicle routes (protected)
    let vehicle_routes = Router::new()
        .route("/mine", get(vehicles::handlers::list_my_vehicles))
        .route("/", post(vehicles::handlers::create_vehicle))
        .route(
            "/{id}",
            put(vehicles::handlers::update_vehicle).delete(vehicles::handlers::delete_vehicle),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(vehicles::handlers::VehicleHandlerState { db: db.clone() });

    // Slot routes: any authenticated user may list, mutations require
    // admin (checked by the AdminUser extractor)
    let slot_routes = Router::new()
        .route(
            "/",
            get(slots::handlers::list_slots).post(slots::handlers::create_slot),
        )
        .route(
            "/{id}",
            put(slots::handlers::update_slot).delete(slots::handlers::delete_slot),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(slots::handlers::SlotHandlerState { db: db.clone() });

    // Reservation routes (protected)
    let reservation_routes = Router::new()
        .route(
            "/",
            post(reservations::handlers::create_reservation)
                .get(reservations::handlers::list_all_reservations),
        )
        .route("/mine", get(reservations::handlers::list_my_reservations))
        .route(
            "/{id}/acknowledge",
            patch(reservations::handlers::acknowledge_reservation),
        )
        .route(
            "/{id}/revoke",
            patch(reservations::handlers::revoke_reservation),
        )
        .route(
            "/{id}/cancel",
            patch(reservations::handlers::cancel_reservation),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(reservations::handlers::ReservationHandlerState {
            service: reservation_service,
            db: db.clone(),
        });

    // Payment routes (protected)
    let payment_routes = Router::new()
        .route("/initiate", post(payments::handlers::initiate_payment))
        .route("/verify", post(payments::handlers::verify_payment))
        .route("/mine", get(payments::handlers::list_my_payments))
        .route("/", get(payments::handlers::list_all_payments))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(payments::handlers::PaymentHandlerState {
            service: payment_service,
            db: db.clone(),
        });

    // Notification routes (protected)
    let notification_routes = Router::new()
        .route("/mine", get(notifications::handlers::list_my_notifications))
        .route("/{id}/read", patch(notifications::handlers::mark_as_read))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(notifications::handlers::NotificationHandlerState { db: db.clone() });

    // Audit log routes (protected, admin checked by extractor)
    let audit_routes = Router::new()
        .route("/", get(audit::handlers::list_all_logs))
        .route("/search", get(audit::handlers::search_logs))
        .route("/table/{tableName}", get(audit::handlers::list_table_logs))
        .route(
            "/record/{tableName}/{recordId}",
            get(audit::handlers::list_record_logs),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(audit::handlers::AuditHandlerState { db: db.clone() });

    // Analytics routes (protected, admin checked by extractor)
    let analytics_routes = Router::new()
        .route("/dashboard", get(analytics::handlers::dashboard_stats))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(analytics::handlers::AnalyticsState { db });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/api/health", get(health::handlers::health_check))
        // Auth
        .nest("/api/auth", auth_public_routes)
        .nest("/api/auth", auth_protected_routes)
        // Vehicles
        .nest("/api/vehicles", vehicle_routes)
        // Parking slots
        .nest("/api/slots", slot_routes)
        // Reservations
        .nest("/api/reservations", reservation_routes)
        // Payments
        .nest("/api/payments", payment_routes)
        // Notifications
        .nest("/api/notifications", notification_routes)
        // Audit logs
        .nest("/api/audit-logs", audit_routes)
        // Analytics
        .nest("/api/analytics", analytics_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
