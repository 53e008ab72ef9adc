//! A tiny command server: a greeting page at `/`, a command endpoint at
//! `/cmd?eval=...`, and 404 for everything else.

pub mod config;
pub mod executor;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
