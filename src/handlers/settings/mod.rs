// Admin settings endpoints (bearer-token gated)
pub mod get;
pub mod put;
