use thiserror::Error;

use crate::ErrorResponse;

/// Failures surfaced to the dashboard user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// Loading the operations failed or returned no usable data
    #[error("network error: {0}")]
    Network(String),
    /// A create/update/delete never reached the backend
    #[error("server unreachable: {0}")]
    Unreachable(String),
    /// A create/update/delete the backend refused
    #[error("request failed: {0}")]
    Request(String),
    /// Form input rejected before anything was sent
    #[error("invalid input: {0}")]
    Validation(String),
}

impl DashboardError {
    /// Build a request error from a non-2xx response body
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = extract_error_message(body)
            .unwrap_or_else(|| format!("Server responded with status {}", status));
        DashboardError::Request(message)
    }

    /// Text shown in the notification banner
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Network(_) => "Error while loading data".to_string(),
            DashboardError::Unreachable(_) => "Could not reach the server, please try again".to_string(),
            DashboardError::Request(message) | DashboardError::Validation(message) => message.clone(),
        }
    }
}

/// Backend message from an error body: the `error` field of a JSON body, or the raw text
pub fn extract_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) if !response.error.trim().is_empty() => Some(response.error),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_from_json() {
        assert_eq!(
            extract_error_message(r#"{"error": "Invalid amount"}"#),
            Some("Invalid amount".to_string())
        );
    }

    #[test]
    fn test_extract_error_message_from_text() {
        assert_eq!(extract_error_message("  Bad Gateway \n"), Some("Bad Gateway".to_string()));
        assert_eq!(extract_error_message(""), None);
        assert_eq!(extract_error_message(r#"{"error": ""}"#), None);
    }

    #[test]
    fn test_request_error_falls_back_to_status() {
        assert_eq!(
            DashboardError::from_response_body(502, ""),
            DashboardError::Request("Server responded with status 502".to_string())
        );
        assert_eq!(
            DashboardError::from_response_body(400, r#"{"error":"Invalid operation type"}"#),
            DashboardError::Request("Invalid operation type".to_string())
        );
    }

    #[test]
    fn test_user_messages() {
        let network = DashboardError::Network("connection refused".to_string());
        assert_eq!(network.user_message(), "Error while loading data");
        assert_eq!(network.to_string(), "network error: connection refused");

        let unreachable = DashboardError::Unreachable("Failed to delete operation: connection refused".to_string());
        assert_eq!(unreachable.user_message(), "Could not reach the server, please try again");
        assert_ne!(unreachable.user_message(), network.user_message());

        let request = DashboardError::Request("Operation not found".to_string());
        assert_eq!(request.user_message(), "Operation not found");

        let validation = DashboardError::Validation("Please fill in all fields".to_string());
        assert_eq!(validation.user_message(), "Please fill in all fields");
    }
}
