use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::{ApiError, ApiException},
    protocol::{EmployeePage, EmployeeQuery, EMPLOYEES_PATH},
};
use tracing::debug;

use crate::error::FetchError;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Issues one `GET /api/employees` per call. Retrying is the caller's job.
#[async_trait]
pub trait EmployeeTransport: Send + Sync {
    async fn fetch_page(&self, query: &EmployeeQuery) -> Result<EmployeePage, FetchError>;
}

pub struct HttpEmployeeTransport {
    http: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpEmployeeTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{EMPLOYEES_PATH}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmployeeTransport for HttpEmployeeTransport {
    async fn fetch_page(&self, query: &EmployeeQuery) -> Result<EmployeePage, FetchError> {
        let endpoint = self.endpoint();
        let mut request = self.http.get(&endpoint).query(query);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(
            endpoint = %endpoint,
            status = status.as_u16(),
            bytes = body.len(),
            "directory: employee page response received"
        );

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: describe_error_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn describe_error_body(body: &str) -> String {
    if let Some(api_error) = ApiError::from_body(body) {
        return ApiException::from(api_error).to_string();
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// Transport for running without a directory service; every attempt fails.
pub struct UnavailableTransport;

#[async_trait]
impl EmployeeTransport for UnavailableTransport {
    async fn fetch_page(&self, _query: &EmployeeQuery) -> Result<EmployeePage, FetchError> {
        Err(FetchError::Transport(
            "directory service unavailable (offline mode)".to_string(),
        ))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
