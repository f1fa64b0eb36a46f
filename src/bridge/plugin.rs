//! The `video_storage_query` channel handler.

use super::codec::{MethodCall, Value};
use super::host::{ChannelHost, MethodCallHandler, Responder};
use crate::query::MediaQuery;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};
use vsq_common::VideoRecord;

/// Default name of the channel the plugin listens on.
pub const CHANNEL: &str = "video_storage_query";

/// Lists every video in the media index. No argument.
pub const QUERY_VIDEOS: &str = "query_videos";

/// Returns a PNG thumbnail. Argument: file path string.
pub const GET_THUMBNAIL: &str = "get_thumbnail";

/// Error code for a thumbnail that could not be produced.
pub const DECODE_FAILURE: &str = "decode_failure";

/// Error code for a call whose argument has the wrong shape.
pub const INVALID_ARGUMENT: &str = "invalid_argument";

impl From<&VideoRecord> for Value {
    fn from(record: &VideoRecord) -> Self {
        record
            .fields()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

/// Answers video storage calls by delegating to a [`MediaQuery`].
pub struct VideoStorageQueryPlugin {
    query: Arc<dyn MediaQuery>,
}

impl VideoStorageQueryPlugin {
    pub fn new(query: Arc<dyn MediaQuery>) -> Self {
        Self { query }
    }

    /// Register a plugin over `query` on `channel`.
    pub fn attach(host: &mut ChannelHost, channel: &str, query: Arc<dyn MediaQuery>) {
        host.set_method_call_handler(channel, Some(Box::new(Self::new(query))));
    }

    /// Remove whatever handler is registered on `channel`.
    pub fn detach(host: &mut ChannelHost, channel: &str) {
        host.set_method_call_handler(channel, None);
    }

    fn get_thumbnail(&self, arguments: &Value, result: &mut Responder) {
        let Some(path) = arguments.as_str() else {
            result.error(
                INVALID_ARGUMENT,
                "get_thumbnail expects a file path string",
                arguments.clone(),
            );
            return;
        };

        match self.query.extract_thumbnail(Path::new(path)) {
            Ok(png) => {
                debug!("Thumbnail for {} is {} bytes", path, png.len());
                result.success(Value::bytes(png));
            }
            Err(e) => {
                warn!("Thumbnail failed: {}", e);
                result.error(DECODE_FAILURE, e.to_string(), Value::from(path));
            }
        }
    }
}

impl MethodCallHandler for VideoStorageQueryPlugin {
    fn on_method_call(&self, call: &MethodCall, result: &mut Responder) {
        match call.method.as_str() {
            QUERY_VIDEOS => {
                let videos = self.query.list_videos();
                result.success(Value::List(videos.iter().map(Value::from).collect()));
            }
            GET_THUMBNAIL => self.get_thumbnail(&call.arguments, result),
            other => debug!("Ignoring unknown method: {}", other),
        }
    }
}
