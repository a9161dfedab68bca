use super::{ToolInvocation, ToolOutcome};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Executes external tool invocations.
///
/// Returns `Err` only when the process could not be launched or its captured
/// output could not be stored. A non-zero exit is reported in the outcome.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutcome>;
}

/// Runs tools as child processes and waits for them to exit
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutcome> {
        debug!(
            command = %invocation,
            cwd = %invocation.working_dir.display(),
            "Launching external tool"
        );

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to launch {}", invocation.program))?;

        if let Some(path) = &invocation.stdout_path {
            tokio::fs::write(path, &output.stdout)
                .await
                .with_context(|| format!("Failed to write tool output to {}", path.display()))?;
        }

        if !output.stderr.is_empty() {
            debug!(
                program = %invocation.program,
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "Tool stderr"
            );
        }

        let outcome = ToolOutcome {
            exit_code: output.status.code(),
            success: output.status.success(),
        };

        if !outcome.success {
            warn!(
                program = %invocation.program,
                exit_code = ?outcome.exit_code,
                "External tool exited abnormally"
            );
        }

        Ok(outcome)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_runs_in_working_dir_and_captures_stdout() {
        let temp = TempDir::new().unwrap();
        let inv = ToolInvocation::new("pwd", temp.path()).stdout_to("pwd.log");

        let outcome = ProcessRunner::new().run(&inv).await.unwrap();
        assert!(outcome.success);

        let logged = std::fs::read_to_string(temp.path().join("pwd.log")).unwrap();
        let expected = temp.path().canonicalize().unwrap();
        assert_eq!(
            std::path::Path::new(logged.trim()).canonicalize().unwrap(),
            expected
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let inv = ToolInvocation::new("false", temp.path());

        let outcome = ProcessRunner::new().run(&inv).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(1));
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let temp = TempDir::new().unwrap();
        let inv = ToolInvocation::new("dockflow-no-such-tool", temp.path());

        assert!(ProcessRunner::new().run(&inv).await.is_err());
    }
}
