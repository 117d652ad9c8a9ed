//! Shared types for the wash console order engine
//!
//! Pure data and arithmetic only: draft/batch/receipt models, backend wire
//! payloads, money primitives, and the unified error type. No I/O lives
//! here.

pub mod error;
pub mod money;
pub mod order;

pub use error::{ConsoleError, ConsoleResult, FieldErrors};
