//! Request handler module
//!
//! Adapts hyper requests to the router and router responses back to hyper.

pub mod dispatch;

// Re-export main entry point
pub use dispatch::handle_request;
