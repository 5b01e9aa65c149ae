use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::warn;

use crate::{error::AppError, state::AppState, users::repo::User};

/// Resolves the bearer token on a protected route to the owning user record
/// and hands it to the handler. Unknown tokens short-circuit with 403.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Forbidden)?;

        // The stored token is matched verbatim; a `Bearer ` prefix is tolerated.
        let token = header.strip_prefix("Bearer ").unwrap_or(header);

        match User::find_by_token(&state.db, token).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => {
                warn!("unknown access token");
                Err(AppError::Forbidden)
            }
            Err(e) => Err(AppError::Internal(e)),
        }
    }
}
