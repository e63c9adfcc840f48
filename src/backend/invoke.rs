//! Backend invocation: run one resolved command against a text payload.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::spec::{BackendDescriptor, CommandSpec};

/// Classified result of invoking one backend or filter command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// Exit status zero; carries captured stdout (possibly empty).
    Success(String),
    /// The command ran but exited non-zero, or could not be spawned.
    Failed { code: i32, stderr: String },
    /// The name resolves to neither an executable nor a built-in capability.
    Unavailable,
    /// The capability's configuration check reported not ready.
    Unconfigured,
}

/// Seam for invoking backends, mockable in tests.
#[async_trait]
pub trait BackendRunner: Send + Sync {
    async fn invoke(&self, descriptor: &BackendDescriptor, payload: &str) -> InvokeOutcome;
}

/// Production runner backed by real subprocesses.
///
/// No timeout is applied: a hung backend blocks the run until it exits.
pub struct ProcessRunner;

#[async_trait]
impl BackendRunner for ProcessRunner {
    async fn invoke(&self, descriptor: &BackendDescriptor, payload: &str) -> InvokeOutcome {
        let spec = &descriptor.spec;
        let capability = &descriptor.capability;

        let available = match &capability.is_available {
            Some(check) => check(),
            None => capability.run.is_some() || which::which(spec.name()).is_ok(),
        };
        if !available {
            return InvokeOutcome::Unavailable;
        }

        if let Some(check) = &capability.is_configured
            && !check()
        {
            return InvokeOutcome::Unconfigured;
        }

        if let Some(run) = &capability.run {
            // In-process capability: no subprocess, no announcement line.
            return match run(payload) {
                Ok(text) => InvokeOutcome::Success(text),
                Err(detail) => InvokeOutcome::Failed {
                    code: -1,
                    stderr: detail,
                },
            };
        }

        // The one place that announces which external command is running.
        eprintln!("Running {spec}...");

        run_command(spec, payload).await
    }
}

/// Spawn the command, feed the payload on stdin, capture stdout as text.
async fn run_command(spec: &CommandSpec, payload: &str) -> InvokeOutcome {
    let mut child = match Command::new(spec.name())
        .args(spec.args())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            return InvokeOutcome::Failed {
                code: -1,
                stderr: e.to_string(),
            };
        }
    };

    // Feed stdin concurrently with output collection so a chatty command
    // cannot deadlock against a full pipe. A command that never reads its
    // stdin closes the pipe early; that is its business, not a failure.
    let stdin = child.stdin.take();
    let feed = async {
        if let Some(mut stdin) = stdin {
            if let Err(e) = stdin.write_all(payload.as_bytes()).await {
                debug!("backend stopped reading its stdin: {e}");
            }
            let _ = stdin.shutdown().await;
        }
    };

    let (_, output) = tokio::join!(feed, child.wait_with_output());

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            return InvokeOutcome::Failed {
                code: -1,
                stderr: e.to_string(),
            };
        }
    };

    if !output.status.success() {
        return InvokeOutcome::Failed {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
    }

    InvokeOutcome::Success(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::spec::Capability;

    fn descriptor(tokens: &[&str], capability: Capability) -> BackendDescriptor {
        BackendDescriptor {
            spec: CommandSpec::new(tokens.iter().map(|t| t.to_string()).collect()),
            capability,
        }
    }

    #[tokio::test]
    async fn forced_unavailable_skips_execution() {
        let desc = descriptor(
            &["cat"],
            Capability {
                is_available: Some(Arc::new(|| false)),
                ..Capability::default()
            },
        );

        let outcome = ProcessRunner.invoke(&desc, "payload").await;
        assert_eq!(outcome, InvokeOutcome::Unavailable);
    }

    #[tokio::test]
    async fn unconfigured_check_short_circuits_before_spawn() {
        // The command name does not exist, but the availability override says
        // it does; the configuration check must still fire first.
        let desc = descriptor(
            &["definitely-not-a-real-command-xyz"],
            Capability {
                is_available: Some(Arc::new(|| true)),
                is_configured: Some(Arc::new(|| false)),
                ..Capability::default()
            },
        );

        let outcome = ProcessRunner.invoke(&desc, "payload").await;
        assert_eq!(outcome, InvokeOutcome::Unconfigured);
    }

    #[tokio::test]
    async fn unknown_name_is_unavailable() {
        let desc = descriptor(&["definitely-not-a-real-command-xyz"], Capability::default());

        let outcome = ProcessRunner.invoke(&desc, "payload").await;
        assert_eq!(outcome, InvokeOutcome::Unavailable);
    }

    #[tokio::test]
    async fn in_process_handler_runs_without_executable() {
        let desc = descriptor(
            &["upcase"],
            Capability {
                run: Some(Arc::new(|payload: &str| Ok(payload.to_uppercase()))),
                ..Capability::default()
            },
        );

        let outcome = ProcessRunner.invoke(&desc, "hello").await;
        assert_eq!(outcome, InvokeOutcome::Success("HELLO".to_string()));
    }

    #[tokio::test]
    async fn in_process_handler_error_maps_to_failure() {
        let desc = descriptor(
            &["broken"],
            Capability {
                run: Some(Arc::new(|_: &str| Err("handler exploded".to_string()))),
                ..Capability::default()
            },
        );

        let outcome = ProcessRunner.invoke(&desc, "hello").await;
        assert!(matches!(
            outcome,
            InvokeOutcome::Failed { stderr, .. } if stderr == "handler exploded"
        ));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn cat_echoes_the_payload() {
        let desc = descriptor(&["cat"], Capability::default());

        let outcome = ProcessRunner.invoke(&desc, "feat: add parser\n").await;
        assert_eq!(
            outcome,
            InvokeOutcome::Success("feat: add parser\n".to_string())
        );
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn zero_exit_with_empty_output_is_success() {
        let desc = descriptor(&["true"], Capability::default());

        let outcome = ProcessRunner.invoke(&desc, "ignored").await;
        assert_eq!(outcome, InvokeOutcome::Success(String::new()));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn non_zero_exit_is_process_failure() {
        let desc = descriptor(&["false"], Capability::default());

        let outcome = ProcessRunner.invoke(&desc, "ignored").await;
        assert!(matches!(outcome, InvokeOutcome::Failed { code: 1, .. }));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn stderr_is_captured_on_failure() {
        let desc = descriptor(&["sh", "-c", "echo 'quota exceeded' >&2; exit 3"], Capability::default());

        let outcome = ProcessRunner.invoke(&desc, "ignored").await;
        match outcome {
            InvokeOutcome::Failed { code, stderr } => {
                assert_eq!(code, 3);
                assert!(stderr.contains("quota exceeded"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
