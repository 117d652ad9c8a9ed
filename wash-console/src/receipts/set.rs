//! Receipt set - ordered receipts for a batch with a review cursor

use shared::order::ReceiptDocument;

/// Generated receipts for one batch, paged through in the review dialog.
///
/// Receipts keep the order of the drafts that produced them.
#[derive(Debug, Clone, Default)]
pub struct ReceiptSet {
    receipts: Vec<ReceiptDocument>,
    cursor: usize,
}

impl ReceiptSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, receipt: ReceiptDocument) {
        self.receipts.push(receipt);
    }

    pub fn receipts(&self) -> &[ReceiptDocument] {
        &self.receipts
    }

    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The receipt under the cursor, if any were generated
    pub fn current(&self) -> Option<&ReceiptDocument> {
        self.receipts.get(self.cursor)
    }

    /// Page forward; clamps at the last receipt (no wraparound).
    pub fn next(&mut self) {
        if self.cursor + 1 < self.receipts.len() {
            self.cursor += 1;
        }
    }

    /// Page back; clamps at the first receipt.
    pub fn prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Closing the review surface clears the set and resets the cursor.
    pub fn close(&mut self) {
        self.receipts.clear();
        self.cursor = 0;
    }
}
