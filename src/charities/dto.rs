use serde::Deserialize;

/// Clients send `projectId` as either an opaque string or a bare number;
/// both canonicalize to the string key stored in the database.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Text(String),
    Number(i64),
}

impl ProjectId {
    pub fn into_key(self) -> String {
        match self {
            ProjectId::Text(s) => s,
            ProjectId::Number(n) => n.to_string(),
        }
    }
}

/// Body of `PUT /users/:userId`. Absent optional fields take their defaults
/// and overwrite whatever the row held before.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertInterestRequest {
    pub project_id: ProjectId,
    #[serde(default)]
    pub project_title: Option<String>,
    #[serde(default)]
    pub favorite_status: bool,
    #[serde(default)]
    pub donation_amount: f64,
    #[serde(default)]
    pub budget: Option<f64>,
}

/// Query string for `GET /users/:userId/charities`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestQuery {
    pub favorite_status: Option<bool>,
    pub project_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_accepts_string_or_number() {
        let text: ProjectId = serde_json::from_str(r#""wells-123""#).unwrap();
        assert_eq!(text.into_key(), "wells-123");

        let number: ProjectId = serde_json::from_str("42").unwrap();
        assert_eq!(number.into_key(), "42");
    }

    #[test]
    fn absent_fields_default_to_unfavorited_and_zero() {
        let req: UpsertInterestRequest =
            serde_json::from_str(r#"{"projectId": "wells-123"}"#).unwrap();
        assert!(!req.favorite_status);
        assert_eq!(req.donation_amount, 0.0);
        assert!(req.project_title.is_none());
        assert!(req.budget.is_none());
    }

    #[test]
    fn full_body_deserializes_with_camel_case_keys() {
        let req: UpsertInterestRequest = serde_json::from_str(
            r#"{
                "projectId": 7,
                "projectTitle": "Clean Water",
                "favoriteStatus": true,
                "donationAmount": 25.5,
                "budget": 100
            }"#,
        )
        .unwrap();
        assert_eq!(req.project_id.into_key(), "7");
        assert_eq!(req.project_title.as_deref(), Some("Clean Water"));
        assert!(req.favorite_status);
        assert_eq!(req.donation_amount, 25.5);
        assert_eq!(req.budget, Some(100.0));
    }
}
