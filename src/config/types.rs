use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vsq_av::{Backend, ThumbnailOptions, ToolPaths};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub thumbnail: ThumbnailConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub bridge: BridgeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Storage roots scanned for videos. `~` and `$VAR` are expanded.
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,

    /// File extensions to index (empty = built-in video list)
    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default = "default_true")]
    pub follow_links: bool,

    /// Read durations with ffprobe / native FFmpeg (default: true)
    #[serde(default = "default_true")]
    pub probe_durations: bool,
}

fn default_roots() -> Vec<String> {
    vec!["~/Videos".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            extensions: Vec::new(),
            follow_links: true,
            probe_durations: true,
        }
    }
}

impl StoreConfig {
    /// Roots with `~` and environment variables expanded.
    ///
    /// A root whose variables cannot be expanded is kept verbatim.
    pub fn expanded_roots(&self) -> Vec<PathBuf> {
        self.roots
            .iter()
            .map(|root| match shellexpand::full(root) {
                Ok(expanded) => PathBuf::from(expanded.as_ref()),
                Err(e) => {
                    tracing::warn!("Could not expand storage root {}: {}", root, e);
                    PathBuf::from(root)
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThumbnailConfig {
    /// Downscale wider frames to this width (omit for full resolution)
    #[serde(default)]
    pub max_width: Option<u32>,
}

impl ThumbnailConfig {
    pub fn options(&self) -> ThumbnailOptions {
        ThumbnailOptions {
            max_width: self.max_width,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}

impl ToolsConfig {
    pub fn paths(&self) -> ToolPaths {
        ToolPaths {
            ffmpeg: self.ffmpeg_path.clone(),
            ffprobe: self.ffprobe_path.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Channel the video storage plugin listens on
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Channel answering `initialize_permissions`
    #[serde(default = "default_permissions_channel")]
    pub permissions_channel: String,
}

fn default_channel() -> String {
    crate::bridge::plugin::CHANNEL.to_string()
}

fn default_permissions_channel() -> String {
    crate::permissions::CHANNEL.to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            permissions_channel: default_permissions_channel(),
        }
    }
}
