//! Handlers for the `/auth` resource (signup, login, refresh, logout, session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shepherd_core::error::CoreError;
use shepherd_core::types::{DbId, Timestamp};
use shepherd_db::models::session::NewSession;
use shepherd_db::models::user::{CreateUser, User, UserResponse};
use shepherd_db::repositories::{SessionRepo, UserRepo};
use shepherd_events::{event_types, CrmEvent};
use validator::Validate;

use crate::auth::jwt::{sign_access_token, RefreshToken};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by signup, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Returned by `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub session_id: DbId,
    /// When the refresh token of this session stops working.
    pub expires_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register with email + password and open a session. Duplicate emails
/// surface as 409 through the `uq_users_email` constraint.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let min_length = state.config.password_min_length;
    if (input.password.chars().count() as u64) < min_length {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.trim().to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User signed up");
    state
        .event_bus
        .publish(CrmEvent::new(event_types::SIGNED_UP).with_actor(user.id));

    let response = open_session(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        ))
    };

    let mut user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed sign-in attempt");
        return Err(invalid());
    }

    user.last_sign_in_at = Some(UserRepo::record_sign_in(&state.pool, user.id).await?);
    state
        .event_bus
        .publish(CrmEvent::new(event_types::SIGNED_IN).with_actor(user.id));

    let response = open_session(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a new token pair. The old session ends,
/// taking its access tokens with it; presenting the same refresh token again
/// is 401.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let stale = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let current = SessionRepo::find_live_by_refresh_hash(
        &state.pool,
        &RefreshToken::hash_of(&input.refresh_token),
    )
    .await?
    .ok_or_else(stale)?;

    let user = UserRepo::find_by_id(&state.pool, current.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let refresh_token = RefreshToken::generate();
    let next = SessionRepo::rotate(
        &state.pool,
        current.id,
        &new_session(&state, user.id, &refresh_token),
    )
    .await?
    .ok_or_else(stale)?;

    tracing::debug!(user_id = user.id, from = current.id, to = next.id, "Session rotated");
    let response = auth_response(&state, &user, next.id, refresh_token)?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// End every open session of the caller, so all of their access and
/// refresh tokens stop working. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let ended = SessionRepo::end_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(
        user_id = auth_user.user_id,
        session_id = auth_user.session_id,
        ended,
        "User signed out"
    );

    state
        .event_bus
        .publish(CrmEvent::new(event_types::SIGNED_OUT).with_actor(auth_user.user_id));

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
///
/// The user and session behind the presented access token.
pub async fn session(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<SessionResponse>>> {
    let gone = || AppError::Core(CoreError::Unauthorized("Session has ended".into()));

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(gone)?;
    let session = SessionRepo::find_live(&state.pool, auth_user.session_id)
        .await?
        .ok_or_else(gone)?;

    Ok(Json(DataResponse {
        data: SessionResponse {
            user: UserResponse::from(&user),
            session_id: session.id,
            expires_at: session.expires_at,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_session(state: &AppState, user_id: DbId, refresh_token: &RefreshToken) -> NewSession {
    NewSession {
        user_id,
        refresh_token_hash: refresh_token.hash.clone(),
        expires_at: Utc::now() + state.config.jwt.refresh_ttl(),
    }
}

/// Open a session for `user` and issue the token pair bound to it.
async fn open_session(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let refresh_token = RefreshToken::generate();
    let session =
        SessionRepo::open(&state.pool, &new_session(state, user.id, &refresh_token)).await?;
    auth_response(state, user, session.id, refresh_token)
}

fn auth_response(
    state: &AppState,
    user: &User,
    session_id: DbId,
    refresh_token: RefreshToken,
) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = sign_access_token(user.id, session_id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_token.plaintext,
        expires_in: jwt.access_ttl().num_seconds(),
        user: UserResponse::from(user),
    })
}
