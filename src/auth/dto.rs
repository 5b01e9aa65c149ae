use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub name: String,
    pub user_id: Uuid,
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct SecretsResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_uses_camel_case_keys() {
        let resp = LoginResponse {
            name: "ada".into(),
            user_id: Uuid::new_v4(),
            access_token: "deadbeef".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("accessToken").is_some());
        assert!(json.get("user_id").is_none());
    }
}
