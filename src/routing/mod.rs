//! Routing module
//!
//! Maps a parsed request to one of the fixed responses:
//! - `/` serves the configured greeting
//! - `/cmd` runs the `eval` query parameter through the command executor
//! - anything else is a 404

mod router;
mod types;

pub use router::Router;
pub use types::{Request, Response};
