//! Argument-vector process execution for probe commands.
//!
//! Nothing in here goes through a shell. Each stage is spawned directly from
//! its argument vector with stdout and stderr sent to the null device, and a
//! piped probe connects the two stages with an OS pipe.
//!
//! A spawn that fails with [`io::ErrorKind::NotFound`] becomes
//! [`ProbeOutcome::ExecutableNotFound`]. Every other failure propagates.

use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::checklist::{PipeStatusPolicy, ProbeCommand, ProbeOutcome, ProbeShape};
use crate::error::{PreflightError, Result};

/// Run a probe command and block until every stage has exited.
pub fn run_probe(command: &ProbeCommand, policy: PipeStatusPolicy) -> Result<ProbeOutcome> {
    tracing::debug!(command = %command, "running probe");

    let outcome = match command.shape() {
        ProbeShape::Single(argv) => run_single(argv)?,
        ProbeShape::Pipeline { left, right } => run_pipeline(left, right, policy)?,
    };

    tracing::debug!(command = %command, ?outcome, "probe finished");
    Ok(outcome)
}

/// Run one process; a non-zero exit is a `ProcessExecutionFailure`.
fn run_single(argv: &[String]) -> Result<ProbeOutcome> {
    let mut child = match spawn_stage(argv, Stdio::null(), Stdio::null()) {
        Ok(child) => child,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(not_found(argv)),
        Err(source) => return Err(spawn_error(argv, source)),
    };

    let status = child.wait().map_err(|source| spawn_error(argv, source))?;
    require_success(argv, status)?;
    Ok(ProbeOutcome::Installed)
}

/// Run `left | right` without a shell.
///
/// Both children are reaped before returning, on every path.
fn run_pipeline(
    left: &[String],
    right: &[String],
    policy: PipeStatusPolicy,
) -> Result<ProbeOutcome> {
    let mut upstream = match spawn_stage(left, Stdio::null(), Stdio::piped()) {
        Ok(child) => child,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(not_found(left)),
        Err(source) => return Err(spawn_error(left, source)),
    };

    // The pipe handle is moved into the right stage's Command, which is
    // dropped inside spawn_stage. If the right stage cannot start, the read
    // end is closed and the left stage sees a broken pipe instead of blocking.
    let downstream = match upstream.stdout.take() {
        Some(pipe) => spawn_stage(right, Stdio::from(pipe), Stdio::null()),
        None => Err(io::Error::other("left stage stdout was not captured")),
    };

    let right_status = match downstream {
        Ok(mut child) => child.wait().map_err(|source| spawn_error(right, source)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            reap(&mut upstream, left);
            return Ok(not_found(right));
        }
        Err(source) => Err(spawn_error(right, source)),
    };

    let left_status = upstream.wait().map_err(|source| spawn_error(left, source));

    let right_status = right_status?;
    let left_status = left_status?;

    match policy {
        PipeStatusPolicy::Ignore => {
            if !left_status.success() || !right_status.success() {
                tracing::debug!(
                    left = ?left_status.code(),
                    right = ?right_status.code(),
                    "pipeline stage exited non-zero; ignored"
                );
            }
        }
        PipeStatusPolicy::LastStage => require_success(right, right_status)?,
        PipeStatusPolicy::AllStages => {
            require_success(left, left_status)?;
            require_success(right, right_status)?;
        }
    }

    Ok(ProbeOutcome::Installed)
}

/// Spawn one stage with stderr discarded.
///
/// The `Command` is local so any pipe handle passed as `stdin` is released
/// as soon as this returns.
fn spawn_stage(argv: &[String], stdin: Stdio, stdout: Stdio) -> io::Result<Child> {
    let Some((program, args)) = argv.split_first() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty argument vector",
        ));
    };

    Command::new(program)
        .args(args)
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::null())
        .spawn()
}

/// Wait on a child whose result no longer matters.
fn reap(child: &mut Child, argv: &[String]) {
    if let Err(e) = child.wait() {
        tracing::warn!(command = %argv.join(" "), error = %e, "failed to reap probe stage");
    }
}

fn require_success(argv: &[String], status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(PreflightError::ProcessExecutionFailure {
            command: argv.join(" "),
            code: status.code(),
        })
    }
}

fn not_found(argv: &[String]) -> ProbeOutcome {
    ProbeOutcome::ExecutableNotFound {
        program: argv.first().cloned().unwrap_or_default(),
    }
}

fn spawn_error(argv: &[String], source: io::Error) -> PreflightError {
    PreflightError::Spawn {
        command: argv.join(" "),
        source,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const MISSING: &str = "preflight-test-definitely-missing-binary";

    fn probe(tokens: &[&str]) -> ProbeCommand {
        ProbeCommand::parse(tokens.iter().copied()).unwrap()
    }

    #[test]
    fn single_command_success_is_installed() {
        let outcome = run_probe(&probe(&["true"]), PipeStatusPolicy::Ignore).unwrap();
        assert_eq!(outcome, ProbeOutcome::Installed);
    }

    #[test]
    fn single_command_output_is_discarded() {
        let outcome = run_probe(
            &probe(&["sh", "-c", "echo noisy; echo noisy >&2"]),
            PipeStatusPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(outcome, ProbeOutcome::Installed);
    }

    #[test]
    fn single_missing_executable_is_not_found() {
        let outcome = run_probe(&probe(&[MISSING, "--version"]), PipeStatusPolicy::Ignore).unwrap();
        assert_eq!(
            outcome,
            ProbeOutcome::ExecutableNotFound {
                program: MISSING.to_string()
            }
        );
    }

    #[test]
    fn single_non_zero_exit_propagates() {
        let err = run_probe(&probe(&["false"]), PipeStatusPolicy::Ignore).unwrap_err();
        match err {
            PreflightError::ProcessExecutionFailure { command, code } => {
                assert_eq!(command, "false");
                assert_eq!(code, Some(1));
            }
            other => panic!("Expected ProcessExecutionFailure, got {:?}", other),
        }
    }

    #[test]
    fn single_exit_code_is_reported() {
        let err = run_probe(&probe(&["sh", "-c", "exit 7"]), PipeStatusPolicy::Ignore).unwrap_err();
        assert!(matches!(
            err,
            PreflightError::ProcessExecutionFailure { code: Some(7), .. }
        ));
    }

    #[test]
    fn pipeline_with_both_stages_present_is_installed() {
        let outcome = run_probe(
            &probe(&["echo", "nvinfer", "|", "grep", "nvinfer"]),
            PipeStatusPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(outcome, ProbeOutcome::Installed);
    }

    #[test]
    fn pipeline_missing_left_stage_is_not_found() {
        let outcome = run_probe(&probe(&[MISSING, "|", "cat"]), PipeStatusPolicy::Ignore).unwrap();
        assert_eq!(
            outcome,
            ProbeOutcome::ExecutableNotFound {
                program: MISSING.to_string()
            }
        );
    }

    #[test]
    fn pipeline_missing_right_stage_is_not_found() {
        let outcome = run_probe(&probe(&["echo", "hi", "|", MISSING]), PipeStatusPolicy::Ignore).unwrap();
        assert!(outcome.is_missing());
    }

    #[test]
    fn pipeline_missing_right_stage_with_large_left_output_does_not_hang() {
        let outcome = run_probe(
            &probe(&["sh", "-c", "yes | head -c 1000000", "|", MISSING]),
            PipeStatusPolicy::AllStages,
        )
        .unwrap();
        assert!(outcome.is_missing());
    }

    #[test]
    fn pipeline_non_zero_right_stage_ignored_by_default() {
        let outcome = run_probe(
            &probe(&["echo", "hi", "|", "grep", "nomatch"]),
            PipeStatusPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(outcome, ProbeOutcome::Installed);
    }

    #[test]
    fn pipeline_non_zero_right_stage_fails_under_last_stage() {
        let err = run_probe(
            &probe(&["echo", "hi", "|", "grep", "nomatch"]),
            PipeStatusPolicy::LastStage,
        )
        .unwrap_err();
        match err {
            PreflightError::ProcessExecutionFailure { command, code } => {
                assert_eq!(command, "grep nomatch");
                assert_eq!(code, Some(1));
            }
            other => panic!("Expected ProcessExecutionFailure, got {:?}", other),
        }
    }

    #[test]
    fn pipeline_non_zero_left_stage_passes_under_last_stage() {
        let outcome = run_probe(
            &probe(&["false", "|", "cat"]),
            PipeStatusPolicy::LastStage,
        )
        .unwrap();
        assert_eq!(outcome, ProbeOutcome::Installed);
    }

    #[test]
    fn pipeline_non_zero_left_stage_fails_under_all_stages() {
        let err = run_probe(&probe(&["false", "|", "cat"]), PipeStatusPolicy::AllStages).unwrap_err();
        match err {
            PreflightError::ProcessExecutionFailure { command, .. } => {
                assert_eq!(command, "false");
            }
            other => panic!("Expected ProcessExecutionFailure, got {:?}", other),
        }
    }

    #[test]
    fn probe_is_deterministic() {
        let cmd = probe(&[MISSING]);
        let first = run_probe(&cmd, PipeStatusPolicy::Ignore).unwrap();
        let second = run_probe(&cmd, PipeStatusPolicy::Ignore).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn arguments_are_not_shell_interpreted() {
        // With a shell this would run `false` and fail; as an argv it is
        // just text handed to echo.
        let outcome = run_probe(&probe(&["echo", "; false"]), PipeStatusPolicy::Ignore).unwrap();
        assert_eq!(outcome, ProbeOutcome::Installed);
    }
}
