//! Authentication API handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::database::entities::user;
use crate::interfaces::http::common::{ApiError, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub db: sea_orm::DatabaseConnection,
    pub jwt_config: JwtConfig,
}

fn user_info(model: &user::Model) -> UserInfo {
    UserInfo {
        id: model.id.clone(),
        email: model.email.clone(),
        first_name: model.first_name.clone(),
        last_name: model.last_name.clone(),
        role: model.role.as_str().to_string(),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserInfo),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserInfo>)> {
    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(&request.email))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(ApiError::conflict("Email already registered"));
    }

    let password_hash = hash_password(&request.password).map_err(ApiError::internal)?;

    let now = Utc::now();
    let new_user = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        email: Set(request.email.clone()),
        password_hash: Set(password_hash),
        first_name: Set(request.first_name.clone()),
        last_name: Set(request.last_name.clone()),
        role: Set(user::UserRole::User),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = new_user.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(user_info(&inserted))))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(&request.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !user.is_active {
        return Err(ApiError::unauthorized("Account is disabled"));
    }

    let password_valid = verify_password(&request.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = create_token(
        &user.id,
        &user.email,
        user.role.as_str(),
        &state.jwt_config,
    )
    .map_err(ApiError::internal)?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: user_info(&user),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user info", body = UserInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<UserInfo>> {
    let db_user = user::Entity::find_by_id(&user.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(user_info(&db_user)))
}
