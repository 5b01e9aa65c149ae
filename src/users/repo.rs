use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database. The access token doubles as the session
/// credential and is matched verbatim by the auth gate.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub access_token: String,
    pub budget: f64,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        access_token: &str,
        budget: f64,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, access_token, budget)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, access_token, budget, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(access_token)
        .bind(budget)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, access_token, budget, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, access_token, budget, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, access_token, budget, created_at
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Exact-match lookup for the session gate.
    pub async fn find_by_token(db: &PgPool, access_token: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, access_token, budget, created_at
            FROM users
            WHERE access_token = $1
            "#,
        )
        .bind(access_token)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// List users, optionally narrowed by a case-insensitive name fragment.
    pub async fn search_by_name(db: &PgPool, fragment: Option<&str>) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, access_token, budget, created_at
            FROM users
            WHERE $1::text IS NULL OR name ILIKE '%' || $1 || '%'
            ORDER BY created_at
            "#,
        )
        .bind(fragment)
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    pub async fn set_budget(db: &PgPool, id: Uuid, budget: f64) -> anyhow::Result<()> {
        sqlx::query(r#"UPDATE users SET budget = $2 WHERE id = $1"#)
            .bind(id)
            .bind(budget)
            .execute(db)
            .await?;
        Ok(())
    }
}
