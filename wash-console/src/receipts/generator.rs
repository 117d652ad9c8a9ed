//! Receipt generator
//!
//! Resolves every service/material line of a submitted draft to its
//! authoritative name and price and assembles the immutable document. All
//! lookups for one draft are fanned out in a single registry pass; nothing
//! is finalized until every one has completed (or been stubbed).

use crate::catalog::{CatalogRegistry, LineItemRef};
use shared::money;
use shared::order::{DraftOrder, ReceiptDocument, ReceiptMaterialLine, ReceiptServiceLine};
use rust_decimal::Decimal;

/// Employee label used when a mini-order was never assigned
const UNASSIGNED_LABEL: &str = "unassigned";

/// Builds one [`ReceiptDocument`] per created order
#[derive(Clone)]
pub struct ReceiptGenerator {
    registry: CatalogRegistry,
}

impl ReceiptGenerator {
    pub fn new(registry: CatalogRegistry) -> Self {
        Self { registry }
    }

    /// Assemble the receipt for one submitted draft.
    ///
    /// `order_number` is the draft's 1-based position within its batch.
    /// Failed catalog lookups surface as stub lines with a zero price; they
    /// never abort the document.
    pub async fn generate(
        &self,
        draft: &DraftOrder,
        order_id: i64,
        order_number: usize,
        client_name: &str,
        client_phone: &str,
    ) -> ReceiptDocument {
        let refs = collect_refs(draft);
        self.registry.resolve_all(&refs).await;

        let mut amounts: Vec<Decimal> = Vec::new();
        let mut services = Vec::new();
        let mut materials = Vec::new();

        for mini in &draft.mini_orders {
            let employee_name = mini
                .employee_name
                .clone()
                .unwrap_or_else(|| UNASSIGNED_LABEL.to_string());

            for service_id in &mini.services {
                let entry = self.registry.resolve(LineItemRef::service(*service_id));
                amounts.push(money::parse_decimal(&entry.price));
                services.push(ReceiptServiceLine {
                    name: entry.name,
                    price: entry.price,
                    employee_name: employee_name.clone(),
                });
            }
        }

        for mini in &draft.mini_orders {
            for line in &mini.materials {
                let entry = self.registry.resolve(LineItemRef::material(line.material_id));
                let quantity = money::parse_decimal(&line.quantity);
                let unit_price = money::parse_decimal(&entry.price);
                let line_total = money::line_total(quantity, unit_price);
                amounts.push(line_total);
                materials.push(ReceiptMaterialLine {
                    name: entry.name,
                    quantity: line.quantity.clone(),
                    price: entry.price,
                    total_price: money::format_money(line_total),
                });
            }
        }

        let total = money::sum_lines(amounts);

        ReceiptDocument {
            order_id,
            order_number,
            client_name: client_name.to_string(),
            client_phone: client_phone.to_string(),
            car_info: car_info(draft),
            vin: (!draft.vin.is_empty()).then(|| draft.vin.clone()),
            services,
            materials,
            total_amount: money::format_money(total),
            prepayment: money::format_money(money::parse_decimal(&draft.prepayment)),
            created_date: chrono::Local::now().format("%d.%m.%Y").to_string(),
        }
    }
}

fn collect_refs(draft: &DraftOrder) -> Vec<LineItemRef> {
    let mut refs = Vec::new();
    for mini in &draft.mini_orders {
        refs.extend(mini.services.iter().map(|id| LineItemRef::service(*id)));
        refs.extend(
            mini.materials
                .iter()
                .map(|line| LineItemRef::material(line.material_id)),
        );
    }
    refs
}

/// Vehicle line built from the fields the draft actually owns; the backend
/// exposes no brand/model name lookup at this boundary.
fn car_info(draft: &DraftOrder) -> String {
    if draft.license_plate.is_empty() {
        "-".to_string()
    } else {
        draft.license_plate.clone()
    }
}
