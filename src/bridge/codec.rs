//! Wire format of the method-call channel.
//!
//! Every message is one JSON object on its own line. Calls arrive as
//! [`Envelope`]s and answers leave as [`Reply`]s. Values are plain JSON,
//! except byte buffers, which travel as `{"$bytes": "<base64>"}`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A transport-safe value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Bytes),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Wrap a byte buffer.
    pub fn bytes(data: Vec<u8>) -> Self {
        Value::Bytes(Bytes { data })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(&b.data),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl<V: Into<Value>> FromIterator<(String, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// A byte buffer, base64-encoded on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bytes {
    #[serde(rename = "$bytes", with = "base64_data")]
    pub data: Vec<u8>,
}

mod base64_data {
    use super::*;

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// A call as seen by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// An incoming call addressed to a named channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub channel: String,
    /// Correlates the reply with the call; echoed back unchanged.
    #[serde(default)]
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl Envelope {
    pub fn new(channel: impl Into<String>, id: u64, call: MethodCall) -> Self {
        Self {
            channel: channel.into(),
            id,
            method: call.method,
            arguments: call.arguments,
        }
    }

    /// Split into the channel name, id, and the call itself.
    pub fn into_parts(self) -> (String, u64, MethodCall) {
        (
            self.channel,
            self.id,
            MethodCall {
                method: self.method,
                arguments: self.arguments,
            },
        )
    }
}

/// Error payload of a failed call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

/// How a handler answered a call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Success {
        result: Value,
    },
    Error {
        error: ErrorPayload,
    },
    NotImplemented {
        #[serde(rename = "notImplemented")]
        not_implemented: bool,
    },
}

/// The answer to one call, written as a single JSON line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub channel: String,
    pub id: u64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_defaults() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"channel": "c", "method": "query_videos"}"#).unwrap();
        assert_eq!(envelope.id, 0);
        assert!(envelope.arguments.is_null());
    }

    #[test]
    fn test_envelope_string_argument() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"channel": "c", "id": 9, "method": "get_thumbnail", "arguments": "/v/a.mp4"}"#,
        )
        .unwrap();
        let (channel, id, call) = envelope.into_parts();
        assert_eq!(channel, "c");
        assert_eq!(id, 9);
        assert_eq!(call.arguments.as_str(), Some("/v/a.mp4"));
    }

    #[test]
    fn test_value_variants_from_json() {
        let value: Value = serde_json::from_value(json!({
            "n": 3,
            "f": 1.5,
            "s": "x",
            "b": true,
            "l": [null],
            "raw": {"$bytes": "AQID"}
        }))
        .unwrap();

        let map = value.as_map().unwrap();
        assert_eq!(map["n"], Value::Int(3));
        assert_eq!(map["f"], Value::Float(1.5));
        assert_eq!(map["s"], Value::from("x"));
        assert_eq!(map["b"], Value::Bool(true));
        assert_eq!(map["l"].as_list().unwrap(), &[Value::Null]);
        assert_eq!(map["raw"].as_bytes(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_map_with_extra_keys_is_not_bytes() {
        let value: Value = serde_json::from_value(json!({"$bytes": "AQID", "other": 1})).unwrap();
        assert!(value.as_map().is_some());
    }

    #[test]
    fn test_bytes_serialize_as_base64() {
        let json = serde_json::to_value(Value::bytes(vec![0x89, b'P', b'N', b'G'])).unwrap();
        assert_eq!(json, json!({"$bytes": "iVBORw=="}));
    }

    #[test]
    fn test_reply_shapes() {
        let ok = Reply {
            channel: "c".into(),
            id: 1,
            outcome: Outcome::Success {
                result: Value::List(vec![]),
            },
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"channel": "c", "id": 1, "result": []})
        );
        assert!(ok.is_success());

        let err = Reply {
            channel: "c".into(),
            id: 2,
            outcome: Outcome::Error {
                error: ErrorPayload {
                    code: "decode_failure".into(),
                    message: "boom".into(),
                    details: Value::Null,
                },
            },
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"channel": "c", "id": 2, "error": {"code": "decode_failure", "message": "boom"}})
        );

        let declined = Reply {
            channel: "c".into(),
            id: 3,
            outcome: Outcome::NotImplemented {
                not_implemented: true,
            },
        };
        assert_eq!(
            serde_json::to_value(&declined).unwrap(),
            json!({"channel": "c", "id": 3, "notImplemented": true})
        );
    }

    #[test]
    fn test_map_from_iterator() {
        let value: Value = vec![("k".to_string(), "v")].into_iter().collect();
        assert_eq!(value.as_map().unwrap()["k"], Value::from("v"));
    }
}
