//! Network API client over reqwest

use super::ConsoleApi;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::order::{
    CreateOrderRequest, CreateOrderResponse, EmployeeSummary, MaterialDetail, ServiceDetail,
};
use shared::{ConsoleError, ConsoleResult};
use std::time::Duration;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`NetworkApiClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bearer token for authenticated endpoints
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error body shape the backend uses for rejections
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

/// Network client for the console backend
#[derive(Debug, Clone)]
pub struct NetworkApiClient {
    client: Client,
    config: ClientConfig,
}

impl NetworkApiClient {
    pub fn new(config: ClientConfig) -> ConsoleResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ConsoleError::http)?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn auth_header(&self) -> Option<String> {
        self.config.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ConsoleResult<T> {
        let url = format!("{}/{}", self.config.base_url, path);
        let mut req = self.client.get(&url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await.map_err(ConsoleError::http)?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ConsoleResult<T> {
        let url = format!("{}/{}", self.config.base_url, path);
        let mut req = self.client.post(&url).json(body);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await.map_err(ConsoleError::http)?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ConsoleResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.map_err(ConsoleError::http)?;
            // The backend sends either {"detail": ...} or {"message": ...};
            // fall back to the raw body
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.detail.or(body.message))
                .unwrap_or(text);
            return Err(ConsoleError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ConsoleError::invalid_response(e.to_string()))
    }
}

#[async_trait]
impl ConsoleApi for NetworkApiClient {
    async fn fetch_service(&self, id: i64) -> ConsoleResult<ServiceDetail> {
        self.get(&format!("services/{}/", id)).await
    }

    async fn fetch_material(&self, id: i64) -> ConsoleResult<MaterialDetail> {
        self.get(&format!("material/detail/{}/", id)).await
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> ConsoleResult<CreateOrderResponse> {
        self.post("master/orders/", request).await
    }

    async fn list_employees(&self) -> ConsoleResult<Vec<EmployeeSummary>> {
        self.get("employees/").await
    }
}
