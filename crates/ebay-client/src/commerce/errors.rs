//! Normalization of REST error payloads

use serde_json::Value;

use crate::error::{ApiErrorDetail, ErrorEnvelope};

/// A decoded non-2xx REST body.
///
/// Either an `errors` array, or a single OAuth-style error at the top level.
pub struct RestErrorBody<'a>(pub &'a Value);

impl ErrorEnvelope for RestErrorBody<'_> {
    fn errors(&self) -> Vec<ApiErrorDetail> {
        if let Some(entries) = self.0.get("errors").and_then(Value::as_array) {
            return entries.iter().map(entry_detail).collect();
        }

        if !self.0.is_object() {
            return Vec::new();
        }

        vec![ApiErrorDetail {
            code: text(self.0, "error").unwrap_or_else(|| "unknown".to_string()),
            message: text(self.0, "error_description")
                .or_else(|| text(self.0, "message"))
                .unwrap_or_else(|| "Unknown error".to_string()),
            ..Default::default()
        }]
    }

    fn fallback_message(&self) -> &'static str {
        "Commerce API request failed"
    }
}

fn entry_detail(entry: &Value) -> ApiErrorDetail {
    ApiErrorDetail {
        code: text(entry, "errorId")
            .or_else(|| text(entry, "error"))
            .unwrap_or_else(|| "unknown".to_string()),
        message: text(entry, "message")
            .or_else(|| text(entry, "error_description"))
            .unwrap_or_else(|| "Unknown error".to_string()),
        domain: text(entry, "domain"),
        category: text(entry, "category"),
        ..Default::default()
    }
}

/// String or number field as text. `errorId` arrives as a number.
fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_errors_array() {
        let body = json!({
            "errors": [
                {
                    "errorId": 25002,
                    "domain": "API_INVENTORY",
                    "category": "REQUEST",
                    "message": "A user error has occurred. Invalid SKU."
                },
                { "errorId": 25001, "message": "System error" }
            ]
        });

        let errors = RestErrorBody(&body).errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, "25002");
        assert_eq!(errors[0].message, "A user error has occurred. Invalid SKU.");
        assert_eq!(errors[0].domain.as_deref(), Some("API_INVENTORY"));
        assert_eq!(errors[0].category.as_deref(), Some("REQUEST"));
        assert!(errors[1].domain.is_none());
    }

    #[test]
    fn test_top_level_oauth_error() {
        let body = json!({ "error": "invalid_token", "error_description": "Token is expired" });
        let err = RestErrorBody(&body).into_api_error(None);

        assert_eq!(err.to_string(), "Token is expired");
        assert_eq!(err.code(), "invalid_token");
    }

    #[test]
    fn test_top_level_message_only() {
        let body = json!({ "message": "Not Found" });
        let errors = RestErrorBody(&body).errors();
        assert_eq!(errors[0].code, "unknown");
        assert_eq!(errors[0].message, "Not Found");
    }

    #[test]
    fn test_non_json_body_falls_back() {
        let err = RestErrorBody(&Value::Null).into_api_error(Some("<html>".into()));
        assert_eq!(err.to_string(), "Commerce API request failed");
        assert_eq!(err.code(), "unknown");
        assert_eq!(err.raw_body(), Some("<html>"));
    }
}
