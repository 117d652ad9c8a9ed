//! Draft and batch validation
//!
//! Validation is per-draft, but client name/phone are shared fields checked
//! identically for every draft: a single bad shared field invalidates the
//! whole batch. Errors render inline per field, so results are field
//! message maps rather than hard errors.

use shared::FieldErrors;
use shared::order::{DraftOrder, OrderBatch};

/// Country code every client phone must start with
pub const PHONE_COUNTRY_CODE: &str = "996";

/// Digits expected after the country code
pub const PHONE_SUBSCRIBER_DIGITS: usize = 9;

/// Check one draft together with the batch's shared client fields.
///
/// An empty map means the draft is valid.
pub fn validate_draft(draft: &DraftOrder, client_name: &str, client_phone: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if client_name.trim().is_empty() {
        errors.insert("client_name", "client name must not be empty".to_string());
    }

    if !is_valid_phone(client_phone) {
        errors.insert(
            "client_phone",
            format!(
                "phone must be {} followed by exactly {} digits",
                PHONE_COUNTRY_CODE, PHONE_SUBSCRIBER_DIGITS
            ),
        );
    }

    if draft.mini_orders.is_empty() {
        errors.insert("mini_orders", "add at least one mini-order".to_string());
    }

    if !draft.license_plate.is_empty()
        && !draft.license_plate.chars().all(|c| c.is_ascii_alphanumeric())
    {
        errors.insert(
            "license_plate",
            "license plate may contain only letters and digits".to_string(),
        );
    }

    errors
}

/// Check every draft of a batch; one entry per draft, in batch order.
pub fn validate_batch(batch: &OrderBatch) -> Vec<FieldErrors> {
    batch
        .drafts()
        .iter()
        .map(|draft| validate_draft(draft, &batch.client_name, &batch.client_phone))
        .collect()
}

/// Country code 996 (optional leading `+`) followed by exactly nine digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    match digits.strip_prefix(PHONE_COUNTRY_CODE) {
        Some(rest) => {
            rest.len() == PHONE_SUBSCRIBER_DIGITS && rest.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
