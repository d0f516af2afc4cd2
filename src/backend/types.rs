use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /emails/classify`
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest<'a> {
    pub email: &'a str,
    pub provider: &'a str,
}

/// Body of `POST /emails/auto-reply`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoReplyRequest<'a> {
    pub email_id: &'a str,
    pub reply_text: Option<&'a str>,
    /// True iff the agent wrote their own text
    pub custom_reply: bool,
}

impl<'a> AutoReplyRequest<'a> {
    pub fn new(email_id: &'a str, reply_text: Option<&'a str>) -> Self {
        Self {
            email_id,
            reply_text,
            custom_reply: reply_text.is_some(),
        }
    }
}

/// Body of `POST /emails/feedback`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest<'a> {
    pub email_id: &'a str,
    pub correct_classification: &'a str,
}

/// Common reply shape: `{success, ...}` or `{error}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    pub success: Option<bool>,
    pub error: Option<String>,
    pub message: Option<String>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

impl ApiResponse {
    /// Why the service refused, if it did
    pub fn rejection(&self) -> Option<String> {
        if let Some(err) = &self.error {
            return Some(err.clone());
        }
        if self.success == Some(false) {
            return Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| "request was not successful".to_string()),
            );
        }
        None
    }
}

/// Reply from the health endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthStatus {
    pub status: Option<String>,
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        !matches!(self.status.as_deref(), Some(s) if s.eq_ignore_ascii_case("error"))
    }
}

/// Inspect a ticket-feed body: a list-shaped body is data, an object is data
/// unless it announces failure.
pub fn feed_rejection(body: &Value) -> Option<String> {
    let Value::Object(map) = body else {
        return None;
    };
    if let Some(err) = map.get("error") {
        return Some(match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    }
    if map.get("success") == Some(&Value::Bool(false)) {
        return Some(
            map.get("message")
                .and_then(Value::as_str)
                .unwrap_or("request was not successful")
                .to_string(),
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auto_reply_body() {
        let custom = serde_json::to_value(AutoReplyRequest::new("T-1", Some("hi"))).unwrap();
        assert_eq!(
            custom,
            json!({"emailId": "T-1", "replyText": "hi", "customReply": true})
        );
        let canned = serde_json::to_value(AutoReplyRequest::new("T-1", None)).unwrap();
        assert_eq!(
            canned,
            json!({"emailId": "T-1", "replyText": null, "customReply": false})
        );
    }

    #[test]
    fn test_feedback_body() {
        let body = serde_json::to_value(FeedbackRequest {
            email_id: "T-9",
            correct_classification: "Finance",
        })
        .unwrap();
        assert_eq!(body, json!({"emailId": "T-9", "correctClassification": "Finance"}));
    }

    #[test]
    fn test_api_response_rejection() {
        let ok: ApiResponse = serde_json::from_value(json!({"success": true, "id": 3})).unwrap();
        assert_eq!(ok.rejection(), None);
        assert_eq!(ok.rest.get("id"), Some(&json!(3)));

        let failed: ApiResponse =
            serde_json::from_value(json!({"success": false, "message": "quota"})).unwrap();
        assert_eq!(failed.rejection().as_deref(), Some("quota"));

        let errored: ApiResponse = serde_json::from_value(json!({"error": "boom"})).unwrap();
        assert_eq!(errored.rejection().as_deref(), Some("boom"));
    }

    #[test]
    fn test_feed_rejection() {
        assert_eq!(feed_rejection(&json!([{"data": []}])), None);
        assert_eq!(feed_rejection(&json!({"data": [1]})), None);
        assert_eq!(feed_rejection(&json!({"error": "down"})).as_deref(), Some("down"));
        assert_eq!(
            feed_rejection(&json!({"success": false})).as_deref(),
            Some("request was not successful")
        );
    }

    #[test]
    fn test_health_status() {
        let ok: HealthStatus = serde_json::from_value(json!({"status": "OK"})).unwrap();
        assert!(ok.is_ok());
        let bad: HealthStatus = serde_json::from_value(json!({"status": "ERROR"})).unwrap();
        assert!(!bad.is_ok());
    }
}
