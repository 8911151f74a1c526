use serde::{Deserialize, Serialize};

use super::Resource;

/// One sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginLog {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// `success` or `failed`.
    pub status: String,
    pub created_at: String,
}

impl Resource for LoginLog {
    const ITEMS_KEY: &'static str = "logs";
}

/// One page view by a (possibly anonymous) visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorView {
    #[serde(alias = "_id")]
    pub id: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub viewed_at: String,
}

impl Resource for VisitorView {
    const ITEMS_KEY: &'static str = "views";
}

/// A moderation decision on a submitted project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLog {
    #[serde(alias = "_id")]
    pub id: String,
    pub project_id: String,
    pub reviewer_id: String,
    /// `approved`, `rejected` or `pending`.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: String,
}

impl Resource for ReviewLog {
    const ITEMS_KEY: &'static str = "reviews";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_log_accepts_mongo_id() {
        let log: LoginLog = serde_json::from_value(json!({
            "_id": "65f0",
            "email": "a@b.c",
            "status": "failed",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(log.id, "65f0");
        assert_eq!(log.status, "failed");
        assert!(log.user_id.is_none());
    }

    #[test]
    fn review_log_skips_missing_comment() {
        let review = ReviewLog {
            id: "r1".into(),
            project_id: "p1".into(),
            reviewer_id: "u1".into(),
            status: "approved".into(),
            comment: None,
            created_at: "2024-03-01".into(),
        };
        let json = serde_json::to_string(&review).unwrap();
        assert!(!json.contains("comment"));
        assert!(json.contains("projectId"));
    }
}
