//! Order authoring engine for the wash console
//!
//! The console is a thin UI over a REST backend; this crate is the one part
//! with real state and computation: batching drafts into mini-orders, live
//! price aggregation through the catalog registry, and multi-document
//! receipt generation after submission.
//!
//! - [`orders::AuthoringSession`] - batch editing and the submission flow
//! - [`catalog`] - session-scoped id -> name/price resolution with caching
//! - [`receipts`] - receipt generation and the review pager
//! - [`client`] - the backend API boundary

pub mod catalog;
pub mod client;
pub mod orders;
pub mod receipts;
pub mod utils;

pub use client::{ClientConfig, ConsoleApi, NetworkApiClient};
pub use orders::{AuthoringSession, SessionState};
