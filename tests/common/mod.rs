//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which lays out a scratch storage root with a few
//! video files and attaches the bridge to a [`ChannelHost`] over it. Frames
//! come from [`SolidDecoder`], so no ffmpeg install is needed.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::Rgba;
use tempfile::TempDir;

use video_storage_query::bridge::{
    ChannelHost, Envelope, MethodCall, Reply, Value, VideoStorageQueryPlugin,
};
use video_storage_query::permissions::{self, PermissionHandler};
use video_storage_query::store::FsMediaStore;
use video_storage_query::VideoQuery;
use vsq_av::thumbnail::Frame;
use vsq_av::FrameDecoder;

pub const CHANNEL: &str = "video_storage_query";

/// Decodes every existing file to the same 16x9 frame.
pub struct SolidDecoder;

impl FrameDecoder for SolidDecoder {
    fn decode_frame(&self, _path: &Path) -> vsq_av::Result<Frame> {
        Ok(Frame::from_pixel(16, 9, Rgba([200, 40, 40, 255])))
    }
}

/// Bridge wired to a temporary storage root.
pub struct TestHarness {
    pub dir: TempDir,
    pub host: ChannelHost,
}

impl TestHarness {
    /// Storage root holding `Beta.mp4`, `alpha.mkv`, `nested/gamma.webm` and
    /// a non-video `notes.txt`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        write(&dir.path().join("Beta.mp4"), b"beta video");
        write(&dir.path().join("alpha.mkv"), b"alpha");
        write(&dir.path().join("nested/gamma.webm"), b"gamma video data");
        write(&dir.path().join("notes.txt"), b"not a video");

        let store = FsMediaStore::new(vec![dir.path().to_path_buf()]);
        let query = VideoQuery::new(Box::new(store), Box::new(SolidDecoder));

        let mut host = ChannelHost::new();
        VideoStorageQueryPlugin::attach(&mut host, CHANNEL, Arc::new(query));
        host.set_method_call_handler(
            permissions::CHANNEL,
            Some(Box::new(PermissionHandler::new(vec![dir.path().to_path_buf()]))),
        );

        Self { dir, host }
    }

    /// Canonical storage root, as it appears in listed paths.
    pub fn root(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("failed to canonicalize temp dir")
    }

    pub fn call(&self, id: u64, method: &str, arguments: Value) -> Option<Reply> {
        self.call_on(CHANNEL, id, method, arguments)
    }

    pub fn call_on(&self, channel: &str, id: u64, method: &str, arguments: Value) -> Option<Reply> {
        self.host
            .dispatch(Envelope::new(channel, id, MethodCall::new(method, arguments)))
    }
}

pub fn write(path: &Path, bytes: &[u8]) {
    fs::create_dir_all(path.parent().expect("path has a parent")).expect("failed to create dir");
    fs::write(path, bytes).expect("failed to write file");
}
