//! Integration tests for the bridge over a filesystem index.

mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::{TestHarness, CHANNEL};
use video_storage_query::bridge::{Outcome, Value};
use video_storage_query::permissions::{self, INITIALIZE_PERMISSIONS};
use vsq_av::PNG_SIGNATURE;

fn success(reply: Option<video_storage_query::bridge::Reply>) -> Value {
    match reply.expect("call should be answered").outcome {
        Outcome::Success { result } => result,
        other => panic!("expected success, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// query_videos
// ---------------------------------------------------------------------------

#[test]
fn query_videos_lists_every_video_in_order() {
    let h = TestHarness::new();
    let result = success(h.call(1, "query_videos", Value::Null));
    let videos = result.as_list().unwrap();

    // notes.txt is not a video
    assert_eq!(videos.len(), 3);

    let names: Vec<_> = videos
        .iter()
        .map(|v| v.as_map().unwrap()["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["alpha.mkv", "Beta.mp4", "gamma.webm"]);

    let gamma = videos[2].as_map().unwrap();
    let expected = h.root().join("nested").join("gamma.webm");
    assert_eq!(gamma["path"].as_str(), Some(expected.to_str().unwrap()));
    assert_eq!(gamma["size"], Value::from("16"));
}

#[test]
fn query_videos_fields_are_all_text() {
    let h = TestHarness::new();
    let result = success(h.call(1, "query_videos", Value::Null));

    for video in result.as_list().unwrap() {
        let map = video.as_map().unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["dateAdded", "dateModified", "duration", "name", "path", "size"]
        );
        assert!(map.values().all(|v| v.as_str().is_some()));

        // Durations are not probed in this harness
        assert_eq!(map["duration"], Value::from(""));
        assert!(map["dateModified"].as_str().unwrap().parse::<i64>().is_ok());
    }
}

#[test]
fn query_videos_is_repeatable() {
    let h = TestHarness::new();
    let first = success(h.call(1, "query_videos", Value::Null));
    let second = success(h.call(2, "query_videos", Value::Null));
    assert_eq!(first, second);
}

#[test]
fn query_videos_sees_new_files() {
    let h = TestHarness::new();
    common::write(&h.dir.path().join("delta.mov"), b"d");

    let result = success(h.call(1, "query_videos", Value::Null));
    assert_eq!(result.as_list().unwrap().len(), 4);
}

// ---------------------------------------------------------------------------
// get_thumbnail
// ---------------------------------------------------------------------------

#[test]
fn get_thumbnail_returns_png() {
    let h = TestHarness::new();
    let path = h.dir.path().join("Beta.mp4");

    let result = success(h.call(1, "get_thumbnail", Value::from(path.to_str().unwrap())));
    let png = result.as_bytes().unwrap();
    assert!(png.starts_with(&PNG_SIGNATURE));

    let frame = image::load_from_memory(png).unwrap();
    assert_eq!((frame.width(), frame.height()), (16, 9));
}

#[test]
fn get_thumbnail_missing_file_is_decode_failure() {
    let h = TestHarness::new();
    let missing = h.dir.path().join("missing.mp4");
    let reply = h
        .call(1, "get_thumbnail", Value::from(missing.to_str().unwrap()))
        .unwrap();

    let Outcome::Error { error } = reply.outcome else {
        panic!("expected an error reply");
    };
    assert_eq!(error.code, "decode_failure");
    assert_eq!(error.details.as_str(), missing.to_str());
}

#[test]
fn get_thumbnail_without_path_is_invalid() {
    let h = TestHarness::new();
    let reply = h.call(1, "get_thumbnail", Value::Null).unwrap();
    let Outcome::Error { error } = reply.outcome else {
        panic!("expected an error reply");
    };
    assert_eq!(error.code, "invalid_argument");
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[test]
fn unknown_method_has_no_reply() {
    let h = TestHarness::new();
    assert!(h.call(1, "delete_video", Value::Null).is_none());
}

#[test]
fn unknown_channel_has_no_reply() {
    let h = TestHarness::new();
    assert!(h.call_on("elsewhere", 1, "query_videos", Value::Null).is_none());
}

#[test]
fn permissions_channel_grants_root() {
    let h = TestHarness::new();
    let result = success(h.call_on(permissions::CHANNEL, 1, INITIALIZE_PERMISSIONS, Value::Null));

    let grants = result.as_list().unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].as_map().unwrap()["granted"], Value::Bool(true));
}

// ---------------------------------------------------------------------------
// Serve loop
// ---------------------------------------------------------------------------

#[test]
fn serve_answers_line_delimited_calls() {
    let h = TestHarness::new();
    let video = h.dir.path().join("alpha.mkv");

    let input = format!(
        "{}\n{}\n{}\n",
        serde_json::json!({"channel": CHANNEL, "id": 1, "method": "query_videos"}),
        serde_json::json!({"channel": CHANNEL, "id": 2, "method": "nope"}),
        serde_json::json!({
            "channel": CHANNEL,
            "id": 3,
            "method": "get_thumbnail",
            "arguments": video.to_str().unwrap()
        }),
    );

    let mut output = Vec::new();
    let stats = h.host.serve(input.as_bytes(), &mut output).unwrap();
    assert_eq!(stats.received, 3);
    assert_eq!(stats.answered, 2);
    assert_eq!(stats.malformed, 0);

    let replies: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 2);

    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[0]["result"].as_array().unwrap().len(), 3);

    assert_eq!(replies[1]["id"], 3);
    let encoded = replies[1]["result"]["$bytes"].as_str().unwrap();
    let png = STANDARD.decode(encoded).unwrap();
    assert!(png.starts_with(&PNG_SIGNATURE));
}
