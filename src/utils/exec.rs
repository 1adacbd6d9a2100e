use std::path::PathBuf;
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Captured output of an external tool
#[derive(Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Run a program, returning its output whether or not it exited cleanly
pub fn run_unchecked(program: &str, args: &[&str]) -> Result<ExecResult> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| Error::Exec {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    Ok(ExecResult::from(output))
}

/// Run a program and fail unless it exits with status zero
pub fn run(program: &str, args: &[&str]) -> Result<ExecResult> {
    let result = run_unchecked(program, args)?;
    if !result.success {
        return Err(Error::Exec {
            program: program.to_string(),
            message: format!(
                "exit {}: {}",
                result.code.unwrap_or(-1),
                result.stderr.trim()
            ),
        });
    }
    Ok(result)
}

/// Locate a program on `PATH`
pub fn find_program(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}
