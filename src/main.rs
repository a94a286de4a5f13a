//!
//! ParkPoint service entry point.
//! Reads configuration from TOML file (~/.config/parkpoint/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use parkpoint::application::services::{PaymentService, ReservationService};
use parkpoint::domain::payment::MockPaymentGateway;
use parkpoint::infrastructure::crypto::jwt::JwtConfig;
use parkpoint::infrastructure::database::migrator::Migrator;
use parkpoint::notifications::{LogMailer, Mailer, SideEffectDispatcher, SmtpMailer};
use parkpoint::{
    create_api_router, create_event_bus, default_config_path, init_database, AppConfig,
    DatabaseConfig, SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PARKPOINT_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting ParkPoint service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Create default admin user if not exists
    create_default_admin(&db, &app_cfg).await;

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "parkpoint".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Repositories & services ────────────────────────────────
    let repos: Arc<dyn parkpoint::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let event_bus = create_event_bus();
    info!("Event bus initialized for side-effect dispatch");

    let reservation_service = Arc::new(ReservationService::new(repos.clone(), event_bus.clone()));
    let payment_service = Arc::new(PaymentService::new(
        repos,
        Arc::new(MockPaymentGateway),
        event_bus.clone(),
    ));

    // ── Side-effect dispatcher ─────────────────────────────────
    let mailer: Arc<dyn Mailer> = if app_cfg.email.enabled {
        match SmtpMailer::new(&app_cfg.email) {
            Ok(mailer) => {
                info!("SMTP mailer configured for {}", app_cfg.email.smtp_host);
                Arc::new(mailer)
            }
            Err(e) => {
                warn!("Failed to configure SMTP mailer: {}. Emails will be logged.", e);
                Arc::new(LogMailer)
            }
        }
    } else {
        Arc::new(LogMailer)
    };

    let dispatcher = SideEffectDispatcher::new(db.clone(), mailer, event_bus.clone());
    dispatcher.spawn();

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(db.clone(), jwt_config, reservation_service, payment_service);

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("ParkPoint service shutdown complete");
    Ok(())
}

/// Create default admin user if no users exist
async fn create_default_admin(db: &sea_orm::DatabaseConnection, app_cfg: &AppConfig) {
    use parkpoint::infrastructure::crypto::password::hash_password;
    use parkpoint::infrastructure::database::entities::user::{self, UserRole};
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

    let users_count = user::Entity::find().count(db).await.unwrap_or(0);

    if users_count == 0 {
        info!("Creating default admin user...");

        let password_hash = match hash_password(&app_cfg.admin.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {}", e);
                return;
            }
        };

        let now = chrono::Utc::now();
        let admin = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(app_cfg.admin.email.clone()),
            password_hash: Set(password_hash),
            first_name: Set(app_cfg.admin.first_name.clone()),
            last_name: Set(app_cfg.admin.last_name.clone()),
            role: Set(UserRole::Admin),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match admin.insert(db).await {
            Ok(_) => {
                info!("Default admin created: {}", app_cfg.admin.email);
                warn!("Please change the admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create admin user: {}", e);
            }
        }
    }
}
