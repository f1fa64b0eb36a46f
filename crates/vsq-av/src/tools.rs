//! External tool detection and path resolution.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// First line of the version output, if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Configured locations for the CLI tools. `None` means look it up on `PATH`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPaths {
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
}

impl ToolPaths {
    /// Resolve the `ffmpeg` executable.
    pub fn ffmpeg(&self) -> Result<PathBuf> {
        get_tool_path("ffmpeg", self.ffmpeg.as_deref())
    }

    /// Resolve the `ffprobe` executable.
    pub fn ffprobe(&self) -> Result<PathBuf> {
        get_tool_path("ffprobe", self.ffprobe.as_deref())
    }
}

/// Check if a tool is available and get its information.
///
/// FFmpeg tools print their version with `-version`.
///
/// # Example
///
/// ```no_run
/// use vsq_av::check_tool;
///
/// let info = check_tool("ffprobe");
/// if info.available {
///     println!("ffprobe version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str) -> ToolInfo {
    check_tool_at(name, Path::new(name))
}

/// Check a tool at a specific location, reporting it under `name`.
pub fn check_tool_at(name: &str, program: &Path) -> ToolInfo {
    match Command::new(program).arg("-version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            let path = if program.components().count() > 1 {
                Some(program.to_path_buf())
            } else {
                which::which(program).ok()
            };

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path,
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

/// Check the tools used for probing and thumbnail extraction.
///
/// Tools are resolved the same way decoding resolves them, so a configured
/// path that does not exist falls back to `PATH`.
pub fn check_tools(paths: &ToolPaths) -> Vec<ToolInfo> {
    [("ffmpeg", paths.ffmpeg()), ("ffprobe", paths.ffprobe())]
        .into_iter()
        .map(|(name, resolved)| match resolved {
            Ok(program) => check_tool_at(name, &program),
            Err(_) => ToolInfo {
                name: name.to_string(),
                available: false,
                version: None,
                path: None,
            },
        })
        .collect()
}

/// Require that a tool is available on `PATH`, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }

    require_tool(name)
}
