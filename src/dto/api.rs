//! Response envelope shared by every API endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pagination::{Paginated, PaginationMeta};
use crate::services::FieldViolation;

/// `{success, data?, meta?, error?, message?, details?}`; absent keys are
/// omitted from the JSON.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: None,
            error: None,
            message: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn page(page: Paginated<T>) -> Self {
        Self {
            meta: Some(page.meta),
            ..Self::data(page.data)
        }
    }
}

impl ApiResponse<()> {
    /// Successful response carrying only a confirmation message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            meta: None,
            error: None,
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn error(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            meta: None,
            error: Some(error.into()),
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn validation(details: Vec<FieldViolation>) -> Self {
        Self {
            success: false,
            data: None,
            meta: None,
            error: Some("Validation Error".to_string()),
            message: None,
            details: Some(details),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountData {
    pub count: usize,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_are_omitted() {
        let value = serde_json::to_value(ApiResponse::message("Customer deleted successfully"))
            .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"success": true, "message": "Customer deleted successfully"})
        );
    }

    #[test]
    fn page_carries_meta() {
        let page = Paginated::new(vec![1, 2], 1, 2, 5);
        let value = serde_json::to_value(ApiResponse::page(page)).unwrap();

        assert_eq!(value["data"], serde_json::json!([1, 2]));
        assert_eq!(value["meta"]["totalPages"], 3);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn validation_lists_details() {
        let value = serde_json::to_value(ApiResponse::validation(vec![FieldViolation::new(
            "email",
            "Invalid email address",
        )]))
        .unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Validation Error");
        assert_eq!(value["details"][0]["field"], "email");
        assert!(value.get("message").is_none());
    }
}
