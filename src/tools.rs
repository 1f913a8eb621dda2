//! External tool detection and invocation.
//!
//! HEIC encoding and MOV transcoding are delegated to `heif-enc` and `ffmpeg`.
//! This module finds those executables and runs them to completion, returning
//! captured output so callers can fold failures into their own error types.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tokio::task;
use tracing::{debug, warn};

pub const HEIF_ENC: &str = "heif-enc";
pub const FFMPEG: &str = "ffmpeg";

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    /// First line of the tool's version output
    pub version: Option<String>,
    pub path: Option<PathBuf>,
}

/// Probe a tool by running it with `version_arg`.
pub fn check_tool_with_arg(name: &str, version_arg: &str) -> ToolInfo {
    let result = Command::new(name)
        .arg(version_arg)
        .stdin(Stdio::null())
        .output();

    match result {
        Ok(output) if output.status.success() => {
            // heif-enc prints its banner on stderr
            let text = if output.stdout.is_empty() {
                String::from_utf8_lossy(&output.stderr).into_owned()
            } else {
                String::from_utf8_lossy(&output.stdout).into_owned()
            };

            ToolInfo {
                name: name.to_string(),
                available: true,
                version: text.lines().next().map(|s| s.trim().to_string()),
                path: which::which(name).ok(),
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check the tools the converter shells out to.
pub fn check_tools() -> Vec<ToolInfo> {
    vec![
        check_tool_with_arg(HEIF_ENC, "--version"),
        check_tool_with_arg(FFMPEG, "-version"),
    ]
}

/// Resolve a tool, preferring a configured path over PATH lookup.
///
/// Returns `None` when neither the configured path nor PATH yields an executable.
pub fn resolve_tool(name: &str, configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        warn!("Configured {} path {:?} does not exist, falling back to PATH", name, path);
    }

    which::which(name).ok()
}

/// Result of a finished tool invocation.
#[derive(Debug)]
pub struct ToolRun {
    pub success: bool,
    pub status: String,
    pub stderr: String,
}

impl ToolRun {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Human readable failure description: stderr when present, else the exit status
    pub fn failure_reason(&self) -> String {
        if self.stderr.is_empty() {
            self.status.clone()
        } else {
            format!("{} ({})", self.stderr, self.status)
        }
    }
}

/// Run `program` with `args` and wait for it to exit.
///
/// The error string describes spawn failures only; a non-zero exit is
/// reported through [`ToolRun::success`].
pub async fn run_tool(program: &Path, args: Vec<OsString>) -> std::result::Result<ToolRun, String> {
    debug!("Running {:?} {:?}", program, args);

    let mut cmd = Command::new(program);
    cmd.args(&args).stdin(Stdio::null());

    let output = task::spawn_blocking(move || cmd.output())
        .await
        .map_err(|e| format!("Failed to spawn {} process: {}", program.display(), e))?
        .map_err(|e| format!("{} execution failed: {}", program.display(), e))?;

    Ok(ToolRun::from_output(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tool_not_found() {
        let info = check_tool_with_arg("nonexistent_tool_12345", "--version");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert!(info.path.is_none());
    }

    #[test]
    fn test_resolve_missing_tool() {
        let bogus = Path::new("/definitely/not/here/heif-enc");
        assert!(resolve_tool("nonexistent_tool_12345", Some(bogus)).is_none());
    }

    #[test]
    fn test_resolve_prefers_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("my-ffmpeg");
        std::fs::write(&fake, b"").unwrap();

        assert_eq!(resolve_tool("nonexistent_tool_12345", Some(&fake)), Some(fake));
    }

    #[test]
    fn test_missing_configured_path_falls_back_to_path() {
        let bogus = Path::new("/definitely/not/here/sh");
        assert_eq!(resolve_tool("sh", Some(bogus)), which::which("sh").ok());
    }

    #[tokio::test]
    async fn test_run_tool_spawn_failure() {
        let result = run_tool(Path::new("/definitely/not/here/tool"), Vec::new()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_failure_reason_falls_back_to_status() {
        let run = ToolRun {
            success: false,
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        assert_eq!(run.failure_reason(), "exit status: 1");
    }
}
