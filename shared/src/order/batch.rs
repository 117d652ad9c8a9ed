//! Order batch: the set of drafts authored together for one client visit

use super::draft::DraftOrder;
use serde::{Deserialize, Serialize};

/// Ordered drafts under one shared client identity, with a cursor selecting
/// the draft currently being edited.
///
/// Invariants: `drafts` is never empty and `cursor < drafts.len()`. Both are
/// enforced by keeping the fields private.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBatch {
    /// Client name shared across every draft in the batch
    pub client_name: String,
    /// Client phone shared across every draft in the batch
    pub client_phone: String,
    drafts: Vec<DraftOrder>,
    cursor: usize,
}

impl Default for OrderBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBatch {
    pub fn new() -> Self {
        Self {
            client_name: String::new(),
            client_phone: String::new(),
            drafts: vec![DraftOrder::new()],
            cursor: 0,
        }
    }

    pub fn drafts(&self) -> &[DraftOrder] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// A batch always holds at least one draft.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The draft under the cursor
    pub fn current(&self) -> &DraftOrder {
        &self.drafts[self.cursor]
    }

    /// Mutable access to the draft under the cursor
    pub fn current_mut(&mut self) -> &mut DraftOrder {
        &mut self.drafts[self.cursor]
    }

    /// Advance to the next draft. At the last draft, appends exactly one
    /// empty draft first.
    pub fn next(&mut self) {
        if self.cursor + 1 == self.drafts.len() {
            self.drafts.push(DraftOrder::new());
        }
        self.cursor += 1;
    }

    /// Step back to the previous draft; no-op at the first one.
    pub fn prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Discard all drafts and shared client fields.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
