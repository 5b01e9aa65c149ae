use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One user's relationship to one external charity project. A (user, project)
/// pair has at most one row, enforced by a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CharityInterest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: String,
    pub project_title: Option<String>,
    pub favorite_status: bool,
    pub donation_amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Field values written by an upsert. Missing request fields arrive here
/// already defaulted, so the row is overwritten wholesale.
#[derive(Debug)]
pub struct InterestUpsert<'a> {
    pub project_id: &'a str,
    pub project_title: Option<&'a str>,
    pub favorite_status: bool,
    pub donation_amount: f64,
}

impl CharityInterest {
    /// Create-or-overwrite keyed on (user_id, project_id) in one statement,
    /// so concurrent writers cannot duplicate the pair; last writer wins.
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        values: &InterestUpsert<'_>,
    ) -> anyhow::Result<CharityInterest> {
        let interest = sqlx::query_as::<_, CharityInterest>(
            r#"
            INSERT INTO charity_interests
                (user_id, project_id, project_title, favorite_status, donation_amount)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, project_id) DO UPDATE SET
                project_title = EXCLUDED.project_title,
                favorite_status = EXCLUDED.favorite_status,
                donation_amount = EXCLUDED.donation_amount,
                updated_at = now()
            RETURNING id, user_id, project_id, project_title, favorite_status,
                      donation_amount, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(values.project_id)
        .bind(values.project_title)
        .bind(values.favorite_status)
        .bind(values.donation_amount)
        .fetch_one(db)
        .await?;
        Ok(interest)
    }

    /// All of a user's interests in first-favorite order, optionally filtered
    /// by favorite status.
    pub async fn list_for_user(
        db: &PgPool,
        user_id: Uuid,
        favorite_status: Option<bool>,
    ) -> anyhow::Result<Vec<CharityInterest>> {
        let interests = sqlx::query_as::<_, CharityInterest>(
            r#"
            SELECT id, user_id, project_id, project_title, favorite_status,
                   donation_amount, created_at, updated_at
            FROM charity_interests
            WHERE user_id = $1 AND ($2::boolean IS NULL OR favorite_status = $2)
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .bind(favorite_status)
        .fetch_all(db)
        .await?;
        Ok(interests)
    }

    pub async fn find_by_project(
        db: &PgPool,
        user_id: Uuid,
        project_id: &str,
    ) -> anyhow::Result<Option<CharityInterest>> {
        let interest = sqlx::query_as::<_, CharityInterest>(
            r#"
            SELECT id, user_id, project_id, project_title, favorite_status,
                   donation_amount, created_at, updated_at
            FROM charity_interests
            WHERE user_id = $1 AND project_id = $2
            "#,
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_optional(db)
        .await?;
        Ok(interest)
    }

    /// Interests the user has actually donated to.
    pub async fn list_donations(
        db: &PgPool,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<CharityInterest>> {
        let interests = sqlx::query_as::<_, CharityInterest>(
            r#"
            SELECT id, user_id, project_id, project_title, favorite_status,
                   donation_amount, created_at, updated_at
            FROM charity_interests
            WHERE user_id = $1 AND donation_amount > 0
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(interests)
    }
}
