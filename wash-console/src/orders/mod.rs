//! Order authoring: validation and the session state machine

pub mod session;
pub mod validate;

pub use session::{AuthoringSession, SessionState};
