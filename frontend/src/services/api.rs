use gloo::net::http::{Request, Response};
use shared::{
    CreateOperationRequest, DashboardError, OperationsResponse, OperationsSnapshot, UpdateOperationRequest,
};

const OPERATIONS_PATH: &str = "/api/operations";

/// API client for the operations endpoints
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Client talking to the origin that served the page
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn operations_url(&self) -> String {
        format!("{}{}", self.base_url, OPERATIONS_PATH)
    }

    pub fn operation_url(&self, id: &str) -> String {
        format!("{}/{}", self.operations_url(), id)
    }

    /// Load both lists and the balance. Every failure is reported as a network error.
    pub async fn fetch_all(&self) -> Result<OperationsSnapshot, DashboardError> {
        let response = Request::get(&self.operations_url())
            .send()
            .await
            .map_err(|e| DashboardError::Network(format!("Failed to fetch operations: {}", e)))?;

        if !response.ok() {
            return Err(DashboardError::Network(format!(
                "Server responded with status {}",
                response.status()
            )));
        }

        let data = response
            .json::<OperationsResponse>()
            .await
            .map_err(|e| DashboardError::Network(format!("Failed to parse operations: {}", e)))?;

        Ok(data.into_snapshot())
    }

    pub async fn create(&self, request: CreateOperationRequest) -> Result<(), DashboardError> {
        let response = Request::post(&self.operations_url())
            .json(&request)
            .map_err(|e| DashboardError::Request(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| DashboardError::Unreachable(format!("Failed to create operation: {}", e)))?;

        Self::check_mutation(response).await
    }

    pub async fn update(&self, id: &str, request: UpdateOperationRequest) -> Result<(), DashboardError> {
        let response = Request::put(&self.operation_url(id))
            .json(&request)
            .map_err(|e| DashboardError::Request(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| DashboardError::Unreachable(format!("Failed to update operation: {}", e)))?;

        Self::check_mutation(response).await
    }

    pub async fn remove(&self, id: &str) -> Result<(), DashboardError> {
        let response = Request::delete(&self.operation_url(id))
            .send()
            .await
            .map_err(|e| DashboardError::Unreachable(format!("Failed to delete operation: {}", e)))?;

        Self::check_mutation(response).await
    }

    async fn check_mutation(response: Response) -> Result<(), DashboardError> {
        if response.ok() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DashboardError::from_response_body(response.status(), &body))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_client_uses_same_origin() {
        let client = ApiClient::default();

        assert_eq!(client.operations_url(), "/api/operations");
        assert_eq!(client.operation_url("7"), "/api/operations/7");
    }

    #[test]
    fn test_custom_base_url() {
        let client = ApiClient::with_base_url("http://localhost:3000/");

        assert_eq!(client.operations_url(), "http://localhost:3000/api/operations");
        assert_eq!(client.operation_url("abc"), "http://localhost:3000/api/operations/abc");
    }
}
