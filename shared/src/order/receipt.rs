//! Receipt document: the finalized, priced summary of one submitted order
//!
//! Built once per created order, immutable thereafter. The same structure is
//! handed to the HTML exporter and the print renderer, so both render
//! identical totals.

use serde::{Deserialize, Serialize};

/// One resolved service line on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptServiceLine {
    pub name: String,
    /// Resolved catalog price, two-decimal string
    pub price: String,
    pub employee_name: String,
}

/// One resolved material line on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptMaterialLine {
    pub name: String,
    pub quantity: String,
    /// Resolved unit price
    pub price: String,
    /// `quantity * price`, two-decimal string
    pub total_price: String,
}

/// Finalized summary of one submitted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDocument {
    /// Backend order id
    pub order_id: i64,
    /// 1-based position of the order within its batch
    pub order_number: usize,
    pub client_name: String,
    pub client_phone: String,
    /// Vehicle line built from the draft's own fields
    pub car_info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    pub services: Vec<ReceiptServiceLine>,
    pub materials: Vec<ReceiptMaterialLine>,
    /// Sum of all service prices and material line totals, two decimals
    pub total_amount: String,
    pub prepayment: String,
    /// DD.MM.YYYY
    pub created_date: String,
}
