//! Backend API boundary
//!
//! The engine talks to the REST backend only through [`ConsoleApi`], so the
//! whole authoring flow is testable against an in-memory implementation.

mod http;

pub use http::{ClientConfig, NetworkApiClient};

use async_trait::async_trait;
use shared::ConsoleResult;
use shared::order::{
    CreateOrderRequest, CreateOrderResponse, EmployeeSummary, MaterialDetail, ServiceDetail,
};

/// Backend operations consumed by the order authoring flow
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// `GET /services/{id}/`
    async fn fetch_service(&self, id: i64) -> ConsoleResult<ServiceDetail>;

    /// `GET /material/detail/{id}/`
    async fn fetch_material(&self, id: i64) -> ConsoleResult<MaterialDetail>;

    /// `POST /master/orders/`
    async fn create_order(&self, request: &CreateOrderRequest) -> ConsoleResult<CreateOrderResponse>;

    /// `GET /employees/` - read-only directory for mini-order assignment
    async fn list_employees(&self) -> ConsoleResult<Vec<EmployeeSummary>>;
}
