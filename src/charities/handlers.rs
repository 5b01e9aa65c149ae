use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    charities::{
        dto::{InterestQuery, UpsertInterestRequest},
        repo::{CharityInterest, InterestUpsert},
    },
    error::AppError,
    state::AppState,
    users::repo::User,
};

pub fn interest_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id", put(upsert_interest))
        .route("/users/:user_id/charities", get(list_interests))
        .route("/users/:user_id/donations", get(list_donations))
}

#[instrument(skip(state, payload))]
pub async fn upsert_interest(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpsertInterestRequest>,
) -> Result<Json<CharityInterest>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    if let Some(budget) = payload.budget {
        User::set_budget(&state.db, user.id, budget).await?;
    }

    let project_id = payload.project_id.into_key();
    let interest = CharityInterest::upsert(
        &state.db,
        user.id,
        &InterestUpsert {
            project_id: &project_id,
            project_title: payload.project_title.as_deref(),
            favorite_status: payload.favorite_status,
            donation_amount: payload.donation_amount,
        },
    )
    .await?;

    info!(
        user_id = %user.id,
        project_id = %interest.project_id,
        favorite = interest.favorite_status,
        "charity interest upserted"
    );
    Ok(Json(interest))
}

/// `?projectId=` narrows to the single matching record; otherwise the list,
/// optionally filtered by `?favoriteStatus=`.
#[instrument(skip(state))]
pub async fn list_interests(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<InterestQuery>,
) -> Result<Response, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    if let Some(project_id) = query.project_id.as_deref() {
        let interest = CharityInterest::find_by_project(&state.db, user.id, project_id)
            .await?
            .ok_or(AppError::NotFound("charity interest"))?;
        return Ok(Json(interest).into_response());
    }

    let interests =
        CharityInterest::list_for_user(&state.db, user.id, query.favorite_status).await?;
    Ok(Json(interests).into_response())
}

#[instrument(skip(state))]
pub async fn list_donations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<CharityInterest>>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    let donations = CharityInterest::list_donations(&state.db, user.id).await?;
    Ok(Json(donations))
}
