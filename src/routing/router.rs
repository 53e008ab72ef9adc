//! Request router
//!
//! Stateless: the greeting and the executor are fixed at construction, so
//! calling [`Router::handle`] twice with the same request gives the same
//! response (as long as the executor itself is deterministic).

use std::fmt;
use std::sync::Arc;

use super::types::{Request, Response};
use crate::executor::CommandExecutor;
use crate::logger;

const ROOT_PATH: &str = "/";
const CMD_PATH: &str = "/cmd";
const EVAL_PARAM: &str = "eval";
const NOT_FOUND_BODY: &str = "Not Found.";

const TEXT_HTML: &str = "text/html";
const TEXT_PLAIN: &str = "text/plain";

pub struct Router {
    greeting: String,
    executor: Arc<dyn CommandExecutor>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("greeting", &self.greeting)
            .field("executor", &self.executor.name())
            .finish()
    }
}

impl Router {
    pub fn new(greeting: impl Into<String>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            greeting: greeting.into(),
            executor,
        }
    }

    /// Produce the response for a request. Never fails: executor errors
    /// become a 500 response.
    pub fn handle(&self, request: &Request) -> Response {
        match request.path.as_str() {
            ROOT_PATH => Response::new(200, TEXT_HTML, self.greeting.as_str()),
            CMD_PATH => self.run_command(request),
            _ => Response::new(404, TEXT_PLAIN, NOT_FOUND_BODY),
        }
    }

    /// A missing or empty `eval` runs nothing and yields an empty 200
    fn run_command(&self, request: &Request) -> Response {
        let Some(command) = request.param(EVAL_PARAM).filter(|c| !c.is_empty()) else {
            return Response::new(200, TEXT_PLAIN, "");
        };

        match self.executor.execute(command) {
            Ok(value) => {
                logger::log_command_executed(self.executor.name(), command, &value);
                Response::new(200, TEXT_PLAIN, value)
            }
            Err(e) => {
                logger::log_command_failed(self.executor.name(), command, &e);
                Response::new(500, TEXT_PLAIN, format!("Command failed: {e}"))
            }
        }
    }
}
