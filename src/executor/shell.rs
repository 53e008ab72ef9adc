//! Host shell executor
//!
//! Runs the command through `sh -c` with the privileges of the server
//! process. There is no sandbox: anyone who can reach `/cmd` can run
//! anything the server user can. Only enable it on trusted networks.

use std::process::Command;

use super::{check_length, CommandExecutor, ExecError};

#[derive(Debug, Clone)]
pub struct ShellExecutor {
    max_length: usize,
}

impl ShellExecutor {
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl CommandExecutor for ShellExecutor {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn execute(&self, command: &str) -> Result<String, ExecError> {
        check_length(command, self.max_length)?;

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| ExecError::Failed(format!("failed to spawn shell: {e}")))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout)
                .trim_end()
                .to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim_end();
        Err(ExecError::Failed(if stderr.is_empty() {
            format!("command exited with {}", output.status)
        } else {
            stderr.to_string()
        }))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout() {
        let exec = ShellExecutor::new(256);
        assert_eq!(exec.execute("echo hello"), Ok("hello".to_string()));
        assert_eq!(exec.execute("expr 1 + 1"), Ok("2".to_string()));
    }

    #[test]
    fn test_failure_reports_stderr() {
        let exec = ShellExecutor::new(256);
        assert_eq!(
            exec.execute("echo boom >&2; exit 3"),
            Err(ExecError::Failed("boom".to_string()))
        );
    }

    #[test]
    fn test_failure_without_stderr_reports_status() {
        let exec = ShellExecutor::new(256);
        match exec.execute("exit 7") {
            Err(ExecError::Failed(msg)) => assert!(msg.contains('7'), "got: {msg}"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_length_limit_checked_before_spawn() {
        let exec = ShellExecutor::new(4);
        assert_eq!(
            exec.execute("echo hi"),
            Err(ExecError::TooLong { len: 7, max: 4 })
        );
    }
}
