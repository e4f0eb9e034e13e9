//! Message codec
//!
//! Envelopes exchanged over the WebSocket are JSON objects discriminated
//! by a `func` field. [`Command`] covers the client→device direction and
//! [`Response`] the device→client direction.
//!
//! ## Legacy untagged responses
//!
//! Some firmware builds answer without `func` and the page scripts told
//! replies apart by which key was present. [`Codec::decode`] migrates such
//! frames into the tagged schema before deserializing, so everything past
//! the codec only ever sees the tagged sum type. The migration accepts a
//! frame only when exactly one legacy key is present.

mod command;
mod lenient;
mod response;

pub use command::{format_duration, ButtonAction, Command};
pub use response::{DeviceAction, Response, Ssid};

use serde_json::{Map, Value};

use crate::error::{DecodeError, EncodeError};

/// Keys that identified a response before `func` was sent, with the tag
/// each one maps to.
const LEGACY_KEYS: [(&str, &str); 3] = [
    ("host", "wifi_resp"),
    ("ssids", "wifi-ssids"),
    ("ir_resp", "ir_resp"),
];

/// Codec behaviour switches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Migrate responses without a `func` tag instead of rejecting them
    pub accept_untagged: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            accept_untagged: true,
        }
    }
}

/// JSON encoder/decoder for envelopes
#[derive(Clone, Copy, Debug, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    /// Encode an outbound command
    pub fn encode(&self, command: &Command) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(command)?)
    }

    /// Decode an inbound response
    pub fn decode(&self, text: &str) -> Result<Response, DecodeError> {
        let mut value: Value =
            serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;
        let obj = value.as_object_mut().ok_or(DecodeError::NotAnObject)?;

        if !obj.contains_key("func") {
            if !self.config.accept_untagged {
                return Err(DecodeError::Untagged("missing func".to_string()));
            }
            let tag = legacy_tag(obj)?;
            obj.insert("func".to_string(), Value::String(tag.to_string()));
        }

        let func = match obj.get("func") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(DecodeError::Schema {
                    func: other.to_string(),
                    reason: "func must be a string".to_string(),
                })
            }
            None => String::new(),
        };

        serde_json::from_value(value).map_err(|e| DecodeError::Schema {
            func,
            reason: e.to_string(),
        })
    }

    /// Decode an inbound command (device side)
    pub fn decode_command(&self, text: &str) -> Result<Command, DecodeError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;
        let func = match value.as_object() {
            Some(obj) => obj
                .get("func")
                .and_then(Value::as_str)
                .ok_or_else(|| DecodeError::Untagged("missing func".to_string()))?
                .to_string(),
            None => return Err(DecodeError::NotAnObject),
        };
        serde_json::from_value(value).map_err(|e| DecodeError::Schema {
            func,
            reason: e.to_string(),
        })
    }

    /// Encode an outbound response (device side)
    pub fn encode_response(&self, response: &Response) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(response)?)
    }
}

/// Infer the tag of an untagged response from the single legacy key it carries
fn legacy_tag(obj: &Map<String, Value>) -> Result<&'static str, DecodeError> {
    let mut found = LEGACY_KEYS
        .iter()
        .filter(|(key, _)| obj.contains_key(*key))
        .map(|(_, tag)| *tag);

    match (found.next(), found.next()) {
        (Some(tag), None) => Ok(tag),
        (None, _) => Err(DecodeError::Untagged("no identifying key".to_string())),
        (Some(_), Some(_)) => Err(DecodeError::Untagged(
            "more than one identifying key".to_string(),
        )),
    }
}
