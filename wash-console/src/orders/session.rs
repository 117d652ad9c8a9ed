//! Authoring session
//!
//! Owns the order batch being edited, the session-scoped catalog cache, the
//! employee directory, and the submission flow:
//!
//! `Editing -> Validating -> Submitting -> GeneratingReceipts -> Reviewing`
//!
//! Validation failure returns to `Editing` with field errors attached.
//! Submission failure returns to `Editing` with a terminal error for that
//! attempt; already-created orders are not rolled back.

use crate::catalog::{CatalogCache, CatalogRegistry};
use crate::client::ConsoleApi;
use crate::orders::validate;
use crate::receipts::{ReceiptGenerator, ReceiptSet};
use shared::money;
use shared::order::{CreateOrderRequest, OrderBatch, UNASSIGNED_EMPLOYEE};
use shared::{ConsoleError, ConsoleResult, FieldErrors};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Quantity fallback on the draft editor surface (blur with invalid input)
pub const DRAFT_EDITOR_DEFAULT_QTY: &str = "0";

/// Quantity fallback on the materials picker surface
pub const MATERIAL_PICKER_DEFAULT_QTY: &str = "1";

/// Where the batch submission flow currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Editing,
    Validating,
    Submitting,
    GeneratingReceipts,
    Reviewing,
}

/// One authoring/review session for a client visit
pub struct AuthoringSession {
    api: Arc<dyn ConsoleApi>,
    batch: OrderBatch,
    registry: CatalogRegistry,
    /// Employee directory, id -> first name
    employees: HashMap<i64, String>,
    receipts: ReceiptSet,
    state: SessionState,
    /// Last validation result, one entry per draft
    field_errors: Vec<FieldErrors>,
    cancel: CancellationToken,
}

impl AuthoringSession {
    pub fn new(api: Arc<dyn ConsoleApi>) -> Self {
        let registry = CatalogRegistry::new(api.clone(), CatalogCache::new());
        Self {
            api,
            batch: OrderBatch::new(),
            registry,
            employees: HashMap::new(),
            receipts: ReceiptSet::new(),
            state: SessionState::Editing,
            field_errors: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn batch(&self) -> &OrderBatch {
        &self.batch
    }

    pub fn batch_mut(&mut self) -> &mut OrderBatch {
        &mut self.batch
    }

    pub fn registry(&self) -> &CatalogRegistry {
        &self.registry
    }

    pub fn receipts(&self) -> &ReceiptSet {
        &self.receipts
    }

    pub fn receipts_mut(&mut self) -> &mut ReceiptSet {
        &mut self.receipts
    }

    pub fn field_errors(&self) -> &[FieldErrors] {
        &self.field_errors
    }

    // ------------------------------------------------------------------
    // Employee directory
    // ------------------------------------------------------------------

    /// Fetch the employee directory once per session.
    pub async fn load_employees(&mut self) -> ConsoleResult<()> {
        let employees = self.api.list_employees().await?;
        tracing::info!(count = employees.len(), "employee directory loaded");
        self.employees = employees.into_iter().map(|e| (e.id, e.first_name)).collect();
        Ok(())
    }

    pub fn employee_name(&self, id: i64) -> Option<&str> {
        self.employees.get(&id).map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Editing operations on the current draft
    // ------------------------------------------------------------------

    /// Append a mini-order from the service-selection surface to the draft
    /// under the cursor. The display name comes from the directory cache.
    pub fn add_mini_order(&mut self, services: Vec<i64>, employee_id: i64) -> ConsoleResult<u64> {
        let name = self.display_name(employee_id);
        self.batch.current_mut().add_mini_order(services, employee_id, name)
    }

    /// Reassign the employee of a mini-order on the current draft.
    pub fn assign_employee(&mut self, mini_order_id: u64, employee_id: i64) -> bool {
        let name = self.display_name(employee_id);
        match self.batch.current_mut().mini_order_mut(mini_order_id) {
            Some(mini) => {
                mini.set_employee(employee_id, name);
                true
            }
            None => false,
        }
    }

    /// Add a material from the picker surface; invalid quantity input
    /// defaults to one unit.
    pub fn add_material(&mut self, mini_order_id: u64, material_id: i64, quantity: &str) -> bool {
        let quantity = money::normalize_quantity(quantity, MATERIAL_PICKER_DEFAULT_QTY);
        match self.batch.current_mut().mini_order_mut(mini_order_id) {
            Some(mini) => {
                mini.add_material(shared::order::MaterialLine::new(material_id, quantity));
                true
            }
            None => false,
        }
    }

    /// Edit a material quantity on the draft editor surface; invalid input
    /// defaults to zero.
    pub fn set_material_quantity(
        &mut self,
        mini_order_id: u64,
        material_id: i64,
        input: &str,
    ) -> bool {
        let quantity = money::normalize_quantity(input, DRAFT_EDITOR_DEFAULT_QTY);
        let Some(mini) = self.batch.current_mut().mini_order_mut(mini_order_id) else {
            return false;
        };
        match mini.materials.iter_mut().find(|m| m.material_id == material_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove_material(&mut self, mini_order_id: u64, material_id: i64) -> bool {
        match self.batch.current_mut().mini_order_mut(mini_order_id) {
            Some(mini) => mini.remove_material(material_id),
            None => false,
        }
    }

    fn display_name(&self, employee_id: i64) -> Option<String> {
        if employee_id == UNASSIGNED_EMPLOYEE {
            return None;
        }
        self.employees.get(&employee_id).cloned()
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Validate and submit every draft of the batch, then generate the
    /// receipt set.
    ///
    /// Drafts are submitted sequentially - each order id is taken as a
    /// dependency before the next call starts, and the backend does not
    /// guarantee safe concurrent creation for one client. Returns the order
    /// ids in draft order.
    pub async fn submit_all(&mut self) -> ConsoleResult<Vec<i64>> {
        self.state = SessionState::Validating;
        let errors = validate::validate_batch(&self.batch);
        if errors.iter().any(|e| !e.is_empty()) {
            self.field_errors = errors.clone();
            self.state = SessionState::Editing;
            return Err(ConsoleError::Validation(errors));
        }
        self.field_errors.clear();

        self.state = SessionState::Submitting;
        let total = self.batch.len();
        let requests: Vec<CreateOrderRequest> = self
            .batch
            .drafts()
            .iter()
            .map(|draft| CreateOrderRequest::from_draft(&self.batch, draft))
            .collect();

        let mut order_ids = Vec::with_capacity(total);
        for request in &requests {
            let created = tokio::select! {
                // Cancellation wins over a ready response
                biased;
                _ = self.cancel.cancelled() => {
                    self.state = SessionState::Editing;
                    return Err(ConsoleError::Cancelled);
                }
                result = self.api.create_order(request) => match result {
                    Ok(created) => created,
                    Err(err) => {
                        tracing::error!(
                            submitted = order_ids.len(),
                            total,
                            error = %err,
                            "order submission failed, halting batch"
                        );
                        self.state = SessionState::Editing;
                        return Err(ConsoleError::Submission {
                            submitted: order_ids.len(),
                            total,
                            message: err.to_string(),
                        });
                    }
                },
            };
            tracing::info!(order_id = created.id, "order created");
            order_ids.push(created.id);
        }

        self.state = SessionState::GeneratingReceipts;
        let generator = ReceiptGenerator::new(self.registry.clone());
        for (index, order_id) in order_ids.iter().enumerate() {
            let draft = &self.batch.drafts()[index];
            let receipt = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    self.state = SessionState::Editing;
                    return Err(ConsoleError::Cancelled);
                }
                receipt = generator.generate(
                    draft,
                    *order_id,
                    index + 1,
                    &self.batch.client_name,
                    &self.batch.client_phone,
                ) => receipt,
            };
            self.receipts.push(receipt);
        }

        self.state = SessionState::Reviewing;
        Ok(order_ids)
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Close the review dialog: the receipt set is cleared and the authored
    /// drafts are discarded (they were replaced by backend ids).
    pub fn close_review(&mut self) {
        self.receipts.close();
        self.batch.reset();
        self.field_errors.clear();
        self.state = SessionState::Editing;
    }

    /// Navigation-away: cancel outstanding lookups and submissions instead
    /// of leaving them as fire-and-forget work.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}
