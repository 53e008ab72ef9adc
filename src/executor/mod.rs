//! Command executor module
//!
//! The `/cmd?eval=...` endpoint hands its argument to a [`CommandExecutor`].
//! The executor is injected into the router, so the code-execution surface is
//! an explicit, swappable capability:
//!
//! - [`ExpressionExecutor`]: arithmetic evaluation, the default
//! - [`ShellExecutor`]: `sh -c` with full host privileges (remote debugging)
//! - [`DisabledExecutor`]: refuses every command

mod expression;
mod shell;

use std::sync::Arc;
use thiserror::Error;

use crate::config::{CommandConfig, ExecutorKind};
use crate::logger;

pub use expression::ExpressionExecutor;
pub use shell::ShellExecutor;

/// Errors a command executor can report
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },
    #[error("command is {len} bytes, limit is {max}")]
    TooLong { len: usize, max: usize },
    #[error("command execution is disabled")]
    Disabled,
    #[error("{0}")]
    Failed(String),
}

/// Turns a command string into a result string
pub trait CommandExecutor: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn execute(&self, command: &str) -> Result<String, ExecError>;
}

/// Executor that refuses every command
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledExecutor;

impl CommandExecutor for DisabledExecutor {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn execute(&self, _command: &str) -> Result<String, ExecError> {
        Err(ExecError::Disabled)
    }
}

/// Build the executor selected by configuration
pub fn from_config(config: &CommandConfig) -> Arc<dyn CommandExecutor> {
    match config.executor {
        ExecutorKind::Expression => Arc::new(ExpressionExecutor::new(config.max_length)),
        ExecutorKind::Shell => {
            logger::log_warning(
                "Shell executor enabled: /cmd?eval=... runs arbitrary commands with full host privileges",
            );
            Arc::new(ShellExecutor::new(config.max_length))
        }
        ExecutorKind::Disabled => Arc::new(DisabledExecutor),
    }
}

/// Reject commands longer than `max` bytes
fn check_length(command: &str, max: usize) -> Result<(), ExecError> {
    if command.len() > max {
        return Err(ExecError::TooLong {
            len: command.len(),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_refuses_everything() {
        let exec = DisabledExecutor;
        assert_eq!(exec.execute("1+1"), Err(ExecError::Disabled));
        assert_eq!(exec.execute(""), Err(ExecError::Disabled));
    }

    #[test]
    fn test_from_config_selects_kind() {
        let mut cfg = CommandConfig {
            executor: ExecutorKind::Expression,
            max_length: 64,
        };
        assert_eq!(from_config(&cfg).name(), "expression");

        cfg.executor = ExecutorKind::Disabled;
        assert_eq!(from_config(&cfg).name(), "disabled");

        cfg.executor = ExecutorKind::Shell;
        assert_eq!(from_config(&cfg).name(), "shell");
    }

    #[test]
    fn test_error_messages() {
        let err = ExecError::TooLong { len: 10, max: 4 };
        assert_eq!(err.to_string(), "command is 10 bytes, limit is 4");
        assert_eq!(
            ExecError::Disabled.to_string(),
            "command execution is disabled"
        );
    }
}
