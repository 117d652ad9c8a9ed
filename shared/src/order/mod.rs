//! Order authoring types: drafts, batches, wire payloads, receipts

mod batch;
mod draft;
mod receipt;
mod wire;

pub use batch::OrderBatch;
pub use draft::{
    DEFAULT_COMMISSION_RATE, DraftOrder, MaterialLine, MiniOrder, UNASSIGNED_EMPLOYEE,
};
pub use receipt::{ReceiptDocument, ReceiptMaterialLine, ReceiptServiceLine};
pub use wire::{
    CreateOrderRequest, CreateOrderResponse, EmployeeSummary, MaterialDetail, MaterialPayload,
    MiniOrderPayload, ServiceDetail,
};
