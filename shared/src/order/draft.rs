//! Draft order model: material lines, mini-orders, and the draft itself
//!
//! Everything here is in-memory authoring state. A draft lives until the
//! batch is submitted (it is then replaced by the backend order id) or the
//! session is reset.

use crate::error::{ConsoleError, ConsoleResult};
use serde::{Deserialize, Serialize};

/// Employee sentinel for a mini-order nobody has claimed yet
pub const UNASSIGNED_EMPLOYEE: i64 = 0;

/// Commission rate a new mini-order starts with
pub const DEFAULT_COMMISSION_RATE: &str = "10.00";

// ============================================================================
// Material Line
// ============================================================================

/// One material usage line, owned by exactly one mini-order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLine {
    /// Catalog material id
    pub material_id: i64,
    /// User-editable decimal text, normalized at the editing surface
    pub quantity: String,
}

impl MaterialLine {
    pub fn new(material_id: i64, quantity: impl Into<String>) -> Self {
        Self {
            material_id,
            quantity: quantity.into(),
        }
    }
}

// ============================================================================
// Mini-Order
// ============================================================================

/// One employee's assigned slice of work within a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniOrder {
    /// Stable id from the owning draft's counter; survives removals
    pub id: u64,
    /// Assigned employee, or [`UNASSIGNED_EMPLOYEE`]
    pub employee_id: i64,
    /// Display-name cache, populated on assignment; the receipt falls back
    /// to "unassigned" when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    /// Selected service ids, never empty
    pub services: Vec<i64>,
    pub commission_rate: String,
    pub materials: Vec<MaterialLine>,
}

impl MiniOrder {
    /// Create a mini-order from the service-selection surface.
    ///
    /// Fails if no services were selected.
    pub fn new(
        id: u64,
        services: Vec<i64>,
        employee_id: i64,
        employee_name: Option<String>,
    ) -> ConsoleResult<Self> {
        if services.is_empty() {
            return Err(ConsoleError::EmptyServiceSelection);
        }
        Ok(Self {
            id,
            employee_id,
            employee_name,
            services,
            commission_rate: DEFAULT_COMMISSION_RATE.to_string(),
            materials: Vec::new(),
        })
    }

    /// Replace the employee fields in place; services are not revalidated.
    pub fn set_employee(&mut self, employee_id: i64, employee_name: Option<String>) {
        self.employee_id = employee_id;
        self.employee_name = employee_name;
    }

    /// Add a material line. A line for the same material replaces the
    /// existing quantity (not summed); otherwise the line is appended.
    pub fn add_material(&mut self, line: MaterialLine) {
        match self
            .materials
            .iter_mut()
            .find(|m| m.material_id == line.material_id)
        {
            Some(existing) => existing.quantity = line.quantity,
            None => self.materials.push(line),
        }
    }

    /// Remove the line with the given material id, if present.
    pub fn remove_material(&mut self, material_id: i64) -> bool {
        let before = self.materials.len();
        self.materials.retain(|m| m.material_id != material_id);
        self.materials.len() != before
    }
}

// ============================================================================
// Draft Order
// ============================================================================

/// One vehicle/client context under authoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftOrder {
    /// Car brand id
    pub car: i64,
    /// Car model id
    pub model: i64,
    pub license_plate: String,
    pub vin: String,
    /// Body type id
    pub body_type: i64,
    /// Prepayment amount, decimal text
    pub prepayment: String,
    /// Free-text note
    pub note: String,
    pub mini_orders: Vec<MiniOrder>,
    /// Monotonic counter backing mini-order ids
    next_mini_order_id: u64,
}

impl DraftOrder {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Field setters - each replaces exactly one field
    // ------------------------------------------------------------------

    pub fn set_car(&mut self, car: i64) {
        self.car = car;
    }

    pub fn set_model(&mut self, model: i64) {
        self.model = model;
    }

    pub fn set_license_plate(&mut self, plate: impl Into<String>) {
        self.license_plate = plate.into();
    }

    pub fn set_vin(&mut self, vin: impl Into<String>) {
        self.vin = vin.into();
    }

    pub fn set_body_type(&mut self, body_type: i64) {
        self.body_type = body_type;
    }

    pub fn set_prepayment(&mut self, prepayment: impl Into<String>) {
        self.prepayment = prepayment.into();
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    // ------------------------------------------------------------------
    // Mini-order operations
    // ------------------------------------------------------------------

    /// Append a mini-order built from the service-selection surface.
    ///
    /// Returns the stable id of the new mini-order.
    pub fn add_mini_order(
        &mut self,
        services: Vec<i64>,
        employee_id: i64,
        employee_name: Option<String>,
    ) -> ConsoleResult<u64> {
        let id = self.next_mini_order_id;
        let mini = MiniOrder::new(id, services, employee_id, employee_name)?;
        self.next_mini_order_id += 1;
        self.mini_orders.push(mini);
        Ok(id)
    }

    /// Remove a mini-order by its stable id. Survivors keep their order,
    /// so the former next entry takes the removed one's position.
    pub fn remove_mini_order(&mut self, id: u64) -> bool {
        let before = self.mini_orders.len();
        self.mini_orders.retain(|m| m.id != id);
        self.mini_orders.len() != before
    }

    pub fn mini_order(&self, id: u64) -> Option<&MiniOrder> {
        self.mini_orders.iter().find(|m| m.id == id)
    }

    pub fn mini_order_mut(&mut self, id: u64) -> Option<&mut MiniOrder> {
        self.mini_orders.iter_mut().find(|m| m.id == id)
    }

    /// Replace the mini-order list through a pure function of the previous
    /// list. Literal replacement is a closure ignoring its argument.
    pub fn update_mini_orders<F>(&mut self, f: F)
    where
        F: FnOnce(Vec<MiniOrder>) -> Vec<MiniOrder>,
    {
        let previous = std::mem::take(&mut self.mini_orders);
        self.mini_orders = f(previous);
    }

    /// All material lines across the draft, in mini-order order.
    ///
    /// Derived on read, so it can never be observed out of sync with
    /// `mini_orders`.
    pub fn all_materials(&self) -> Vec<MaterialLine> {
        self.mini_orders
            .iter()
            .flat_map(|m| m.materials.iter().cloned())
            .collect()
    }
}
