//! Thin wrappers over apt-get/dpkg invocations

use std::process::{Command, Stdio};

use crate::error::{InstallError, Result};

/// Run a command to completion, mapping a non-zero exit into an error
/// that carries the tail of stderr.
pub fn run(program: &str, args: &[&str], verbose: bool) -> Result<()> {
    if verbose {
        println!("  $ {}", display_command(program, args));
    }
    let output = Command::new(program)
        .args(args)
        .env("DEBIAN_FRONTEND", "noninteractive")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| InstallError::CommandFailed {
            command: program.to_string(),
            reason: e.to_string(),
        })?;

    if output.status.success() {
        return Ok(());
    }
    Err(InstallError::CommandFailed {
        command: display_command(program, args),
        reason: failure_reason(output.status.code(), &output.stderr),
    })
}

/// Best-effort variant: failures are reported to the caller as `false`.
pub fn run_best_effort(program: &str, args: &[&str], verbose: bool) -> bool {
    run(program, args, verbose).is_ok()
}

/// `apt-get <args>` with `-y` already supplied by the caller where needed
pub fn apt_get(args: &[&str], verbose: bool) -> Result<()> {
    run("apt-get", args, verbose)
}

fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

fn failure_reason(code: Option<i32>, stderr: &[u8]) -> String {
    let status = match code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by signal".to_string(),
    };
    let stderr = String::from_utf8_lossy(stderr);
    match stderr.lines().rev().find(|line| !line.trim().is_empty()) {
        Some(last) => format!("{status}: {}", last.trim()),
        None => status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_success() {
        assert!(run("true", &[], false).is_ok());
    }

    #[test]
    fn test_run_failure_carries_command() {
        let err = run("false", &[], false).unwrap_err();
        match err {
            InstallError::CommandFailed { command, .. } => assert_eq!(command, "false"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_run_best_effort_reports_outcome() {
        assert!(run_best_effort("true", &[], false));
        assert!(!run_best_effort("false", &[], false));
        assert!(!run_best_effort("definitely-not-a-real-program", &[], false));
    }

    #[test]
    fn test_run_missing_program() {
        assert!(run("definitely-not-a-real-program", &[], false).is_err());
    }

    #[test]
    fn test_failure_reason_includes_last_stderr_line() {
        let reason = failure_reason(Some(100), b"reading lists...\nE: broken packages\n");
        assert!(reason.contains("status 100"));
        assert!(reason.contains("E: broken packages"));
    }

    #[test]
    fn test_failure_reason_signal() {
        assert_eq!(failure_reason(None, b""), "terminated by signal");
    }
}
