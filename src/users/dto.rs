use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::charities::repo::CharityInterest;
use crate::users::repo::User;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub budget: f64,
}

/// The stored record returned on registration. The password hash stays
/// server-side; everything else, token included, goes back to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub access_token: String,
    pub budget: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub charities: Vec<CharityInterest>,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            access_token: user.access_token,
            budget: user.budget,
            created_at: user.created_at,
            charities: Vec::new(),
        }
    }
}

/// Public projection used by the query endpoints: no token, no hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub budget: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            budget: user.budget,
            created_at: user.created_at,
        }
    }
}

/// Profile-plus-interests view for `/users/:userId/otherUser`.
#[derive(Debug, Serialize)]
pub struct OtherUserResponse {
    pub user: PublicUser,
    pub charities: Vec<CharityInterest>,
}

/// Query string for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$not-a-real-hash".into(),
            access_token: "aa".repeat(128),
            budget: 50.0,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn registered_user_exposes_token_but_never_the_hash() {
        let json = serde_json::to_value(RegisteredUser::from(sample_user())).unwrap();
        assert!(json.get("accessToken").is_some());
        assert_eq!(json["charities"], serde_json::json!([]));
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn public_user_hides_credentials_entirely() {
        let json = serde_json::to_value(PublicUser::from(sample_user())).unwrap();
        assert!(json.get("accessToken").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["name"], "ada");
        assert_eq!(json["budget"], 50.0);
    }
}
