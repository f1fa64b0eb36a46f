//! The method-call bridge.
//!
//! A [`ChannelHost`] owns named channels. The [`VideoStorageQueryPlugin`]
//! attaches itself to one of them and answers `query_videos` and
//! `get_thumbnail` by delegating to a [`MediaQuery`](crate::query::MediaQuery).

pub mod codec;
pub mod host;
pub mod plugin;

pub use codec::{Envelope, MethodCall, Outcome, Reply, Value};
pub use host::{ChannelHost, MethodCallHandler, Responder, ServeStats};
pub use plugin::VideoStorageQueryPlugin;
