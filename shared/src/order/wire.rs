//! Backend request/response payloads for the order flow
//!
//! Field names follow the REST API exactly; these types are the only place
//! the wire shapes live.

use super::batch::OrderBatch;
use super::draft::DraftOrder;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order submission
// ============================================================================

/// `POST /master/orders/` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_phone: String,
    pub car_brand: i64,
    pub car_model: i64,
    pub car_vin: String,
    pub car_license_plate: String,
    pub car_body_type: i64,
    pub prepayment: String,
    pub mini_orders: Vec<MiniOrderPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiniOrderPayload {
    pub employee: i64,
    pub services: Vec<i64>,
    pub commission_rate: String,
    pub materials: Vec<MaterialPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialPayload {
    pub material: i64,
    pub quantity: String,
}

/// `POST /master/orders/` response (only the id is consumed)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    pub id: i64,
}

impl CreateOrderRequest {
    /// Build the submission payload for one draft of a batch.
    ///
    /// The shared client name is split on the first whitespace: first token
    /// becomes the first name, the remainder the last name.
    pub fn from_draft(batch: &OrderBatch, draft: &DraftOrder) -> Self {
        let (first_name, last_name) = split_client_name(&batch.client_name);
        Self {
            client_first_name: first_name,
            client_last_name: last_name,
            client_phone: batch.client_phone.clone(),
            car_brand: draft.car,
            car_model: draft.model,
            car_vin: draft.vin.clone(),
            car_license_plate: draft.license_plate.clone(),
            car_body_type: draft.body_type,
            prepayment: draft.prepayment.clone(),
            mini_orders: draft
                .mini_orders
                .iter()
                .map(|mini| MiniOrderPayload {
                    employee: mini.employee_id,
                    services: mini.services.clone(),
                    commission_rate: mini.commission_rate.clone(),
                    materials: mini
                        .materials
                        .iter()
                        .map(|line| MaterialPayload {
                            material: line.material_id,
                            quantity: line.quantity.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn split_client_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

// ============================================================================
// Catalog lookups
// ============================================================================

/// `GET /services/{id}/` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceDetail {
    pub name: String,
    /// Numeric string
    pub price: String,
}

/// `GET /material/detail/{id}/` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaterialDetail {
    pub name: String,
    /// Numeric string
    pub sell_price: String,
}

// ============================================================================
// Employee directory
// ============================================================================

/// Employee directory entry, read-only
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmployeeSummary {
    pub id: i64,
    pub first_name: String,
}
