use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, SecretsResponse},
        extractors::AuthUser,
        password,
    },
    error::AppError,
    state::AppState,
    users::repo::User,
};

const SECRET_MESSAGE: &str = "these are the secret charity files";

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(login))
        .route("/secrets", get(secrets))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password take the same exit so callers cannot
    // enumerate accounts.
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or(AppError::LoginFailed)?;

    let ok = password::verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(AppError::LoginFailed);
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        name: user.name,
        user_id: user.id,
        access_token: user.access_token,
    }))
}

#[instrument(skip_all)]
pub async fn secrets(AuthUser(user): AuthUser) -> Json<SecretsResponse> {
    info!(user_id = %user.id, "secrets read");
    Json(SecretsResponse {
        message: SECRET_MESSAGE,
    })
}
