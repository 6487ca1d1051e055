//! Process-backed utility runner
//!
//! Children inherit stdin, stdout and stderr.

use std::{
    path::Path,
    process::{ExitStatus, Stdio},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::runner::{RunError, UtilityRunner};

/// Runs utilities as child processes sharing the caller's stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl UtilityRunner for ProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<i32, RunError> {
        debug!(program = %program.display(), ?args, "running utility");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| RunError::Spawn {
                program: program.to_path_buf(),
                source: Arc::new(e),
            })?;

        let status = child.wait().await.map_err(|e| RunError::Wait {
            program: program.to_path_buf(),
            source: Arc::new(e),
        })?;

        Ok(exit_code(status))
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_propagates_exit_code() {
        let code = ProcessRunner
            .run(Path::new("/bin/sh"), &sh("exit 3"))
            .await
            .unwrap();

        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn test_passes_arguments() {
        let mut args = sh(r#"test "$1" = "two words" && test "$2" = "-x""#);
        args.push("sh".to_string());
        args.push("two words".to_string());
        args.push("-x".to_string());

        let code = ProcessRunner.run(Path::new("/bin/sh"), &args).await.unwrap();

        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_signal_maps_to_shell_convention() {
        let code = ProcessRunner
            .run(Path::new("/bin/sh"), &sh("kill -TERM $$"))
            .await
            .unwrap();

        assert_eq!(code, 128 + 15);
    }

    #[tokio::test]
    async fn test_missing_program() {
        let result = ProcessRunner
            .run(Path::new("/definitely/not/a/program"), &[])
            .await;

        assert!(matches!(result, Err(RunError::Spawn { .. })));
    }
}
