//! HTTP protocol layer module
//!
//! URL parsing and hyper response building, kept apart from routing logic.

pub mod response;
pub mod url;

pub use response::{build_413_response, build_500_response, build_router_response};
pub use url::parse_request_target;
