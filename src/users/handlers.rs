use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{extractors::AuthUser, password, token},
    charities::repo::CharityInterest,
    error::AppError,
    state::AppState,
    users::{
        dto::{OtherUserResponse, PublicUser, RegisterRequest, RegisteredUser, UserQuery},
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register))
        .route("/users/:user_id", get(get_user))
        .route("/users/:user_id/otherUser", get(other_user))
        .route("/users/:user_id/budget", get(get_budget))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Field-keyed checks applied before the insert. Uniqueness is verified
/// separately against the store.
fn validate_registration(payload: &RegisterRequest) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    let name_len = payload.name.chars().count();
    if !(2..=20).contains(&name_len) {
        errors.insert(
            "name".to_string(),
            "name must be between 2 and 20 characters".to_string(),
        );
    }
    if !is_valid_email(&payload.email) {
        errors.insert("email".to_string(), "email is invalid".to_string());
    }
    if payload.password.chars().count() < 5 {
        errors.insert(
            "password".to_string(),
            "password must be at least 5 characters".to_string(),
        );
    }
    errors
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUser>), AppError> {
    payload.name = payload.name.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    let mut errors = validate_registration(&payload);

    if !errors.contains_key("name") && User::find_by_name(&state.db, &payload.name).await?.is_some()
    {
        errors.insert("name".to_string(), "name already exists".to_string());
    }
    if !errors.contains_key("email")
        && User::find_by_email(&state.db, &payload.email).await?.is_some()
    {
        errors.insert("email".to_string(), "email already exists".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let hash = password::hash_password(&payload.password)?;
    let access_token = token::generate_access_token();

    let user = User::create(
        &state.db,
        &payload.name,
        &payload.email,
        &hash,
        &access_token,
        payload.budget,
    )
    .await?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(RegisteredUser::from(user))))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = User::search_by_name(&state.db, query.name.as_deref()).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state, _caller))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PublicUser>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn other_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<OtherUserResponse>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    let charities = CharityInterest::list_for_user(&state.db, user.id, None).await?;
    Ok(Json(OtherUserResponse {
        user: user.into(),
        charities,
    }))
}

#[instrument(skip(state))]
pub async fn get_budget(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<f64>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    Ok(Json(user.budget))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            budget: 0.0,
        }
    }

    #[test]
    fn accepts_a_well_formed_registration() {
        let errors = validate_registration(&request("ada", "ada@example.com", "lovelace"));
        assert!(errors.is_empty());
    }

    #[test]
    fn rejects_name_outside_2_to_20_chars() {
        let errors = validate_registration(&request("a", "a@example.com", "secret"));
        assert!(errors.contains_key("name"));

        let long = "x".repeat(21);
        let errors = validate_registration(&request(&long, "a@example.com", "secret"));
        assert!(errors.contains_key("name"));

        let edge = "x".repeat(20);
        let errors = validate_registration(&request(&edge, "a@example.com", "secret"));
        assert!(!errors.contains_key("name"));
    }

    #[test]
    fn rejects_short_password() {
        let errors = validate_registration(&request("ada", "ada@example.com", "1234"));
        assert!(errors.contains_key("password"));

        let errors = validate_registration(&request("ada", "ada@example.com", "12345"));
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["", "plain", "no@tld", "spa ce@example.com"] {
            let errors = validate_registration(&request("ada", bad, "secret"));
            assert!(errors.contains_key("email"), "accepted {bad:?}");
        }
        assert!(is_valid_email("ada@example.com"));
    }

    #[test]
    fn collects_every_failing_field_at_once() {
        let errors = validate_registration(&request("a", "bad", "123"));
        assert_eq!(errors.len(), 3);
    }
}
