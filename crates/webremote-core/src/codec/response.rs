//! Device → client responses

use serde::{Deserialize, Serialize};

use super::lenient;

/// One network found by a WiFi scan
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ssid {
    pub name: String,
}

/// Action reported back by the device for a button command
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceAction {
    Press,
    Click,
    Release,
    Cancel,
    /// The device is still executing a previous command
    Busy,
    /// The button does not auto-repeat; the rest of the gesture is ignored
    NoRepeat,
    #[serde(other)]
    Other,
}

/// Inbound response envelope, tagged by `func`.
///
/// Fields the firmware may omit default to empty values; unknown tags
/// decode to [`Response::Unknown`] and are ignored by the pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "func")]
pub enum Response {
    /// Current WiFi settings
    #[serde(rename = "wifi_resp")]
    WifiResp {
        #[serde(default)]
        host: String,
        #[serde(default)]
        ssid: String,
        #[serde(default)]
        ip: String,
        #[serde(default)]
        timezone: String,
    },

    /// Result of a WiFi scan
    #[serde(rename = "wifi-ssids")]
    WifiSsids {
        #[serde(default)]
        ssids: Vec<Ssid>,
    },

    /// A captured IR code. An empty `kind` means nothing recognizable was read.
    #[serde(rename = "ir_resp")]
    IrResp {
        #[serde(rename = "ir_resp", default, deserialize_with = "lenient::string")]
        row: String,
        #[serde(rename = "type", default, deserialize_with = "lenient::string")]
        kind: String,
        #[serde(default, deserialize_with = "lenient::string")]
        address: String,
        #[serde(default, deserialize_with = "lenient::string")]
        value: String,
        #[serde(default, deserialize_with = "lenient::string")]
        delay: String,
    },

    /// A test code was transmitted
    #[serde(rename = "send_resp")]
    SendResp {},

    /// Outcome of a button command
    #[serde(rename = "btn_resp")]
    BtnResp {
        #[serde(
            default,
            deserialize_with = "lenient::opt_string",
            skip_serializing_if = "Option::is_none"
        )]
        button: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action: Option<DeviceAction>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        redirect: Option<String>,
    },

    #[serde(other)]
    Unknown,
}

impl Response {
    /// The `func` tag of this response, if known
    pub fn func(&self) -> Option<&'static str> {
        match self {
            Response::WifiResp { .. } => Some("wifi_resp"),
            Response::WifiSsids { .. } => Some("wifi-ssids"),
            Response::IrResp { .. } => Some("ir_resp"),
            Response::SendResp {} => Some("send_resp"),
            Response::BtnResp { .. } => Some("btn_resp"),
            Response::Unknown => None,
        }
    }
}
