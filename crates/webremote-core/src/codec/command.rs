//! Client → device commands

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lenient;

/// What happened to a command button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    /// Held past the hold threshold
    Press,
    /// Released before the hold threshold
    Click,
    /// Released after a press
    Release,
    /// Pointer left the button mid-gesture
    Cancel,
}

impl ButtonAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonAction::Press => "press",
            ButtonAction::Click => "click",
            ButtonAction::Release => "release",
            ButtonAction::Cancel => "cancel",
        }
    }
}

/// Outbound command envelope, tagged by `func`.
///
/// Every variant carries `path`, the page the command was issued from, so
/// the device can resolve it against the right remote file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "func")]
pub enum Command {
    /// Ask for the current WiFi settings
    #[serde(rename = "get_wifi")]
    GetWifi { path: String },

    /// Start a WiFi network scan
    #[serde(rename = "scan_wifi")]
    ScanWifi { path: String },

    /// Store the configuration form; one entry per form input
    #[serde(rename = "config_update")]
    ConfigUpdate {
        path: String,
        #[serde(flatten)]
        fields: BTreeMap<String, String>,
    },

    /// Capture the next IR code for action row `row`
    #[serde(rename = "ir_get")]
    IrGet {
        #[serde(rename = "ir_get", deserialize_with = "lenient::string")]
        row: String,
        path: String,
    },

    /// Transmit one IR code
    #[serde(rename = "test_send")]
    TestSend {
        #[serde(rename = "type")]
        kind: String,
        #[serde(deserialize_with = "lenient::string")]
        address: String,
        #[serde(deserialize_with = "lenient::string")]
        value: String,
        path: String,
    },

    /// A command button gesture
    #[serde(rename = "btnVal")]
    BtnVal {
        #[serde(rename = "btnVal", deserialize_with = "lenient::string")]
        button: String,
        action: ButtonAction,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "lenient::opt_string"
        )]
        duration: Option<String>,
        path: String,
    },
}

impl Command {
    /// The `func` tag of this command
    pub fn func(&self) -> &'static str {
        match self {
            Command::GetWifi { .. } => "get_wifi",
            Command::ScanWifi { .. } => "scan_wifi",
            Command::ConfigUpdate { .. } => "config_update",
            Command::IrGet { .. } => "ir_get",
            Command::TestSend { .. } => "test_send",
            Command::BtnVal { .. } => "btnVal",
        }
    }

    /// The page path the command was issued from
    pub fn path(&self) -> &str {
        match self {
            Command::GetWifi { path }
            | Command::ScanWifi { path }
            | Command::ConfigUpdate { path, .. }
            | Command::IrGet { path, .. }
            | Command::TestSend { path, .. }
            | Command::BtnVal { path, .. } => path,
        }
    }
}

/// Render a gesture duration the way the device expects it: the
/// millisecond count as a decimal string, no rounding applied.
pub fn format_duration(ms: f64) -> String {
    format!("{}", ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(250.0), "250");
        assert_eq!(format_duration(12.25), "12.25");
        assert_eq!(format_duration(0.0), "0");
    }

    #[test]
    fn test_config_update_flattens_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("hostname".to_string(), "remote".to_string());
        fields.insert("pwd".to_string(), "a \"quoted\" pass".to_string());
        let cmd = Command::ConfigUpdate {
            path: "/config".to_string(),
            fields,
        };
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&cmd).unwrap()).unwrap();
        assert_eq!(value["func"], "config_update");
        assert_eq!(value["hostname"], "remote");
        assert_eq!(value["pwd"], "a \"quoted\" pass");
        assert_eq!(value["path"], "/config");
    }

    #[test]
    fn test_press_has_no_duration() {
        let cmd = Command::BtnVal {
            button: "1".to_string(),
            action: ButtonAction::Press,
            duration: None,
            path: "/".to_string(),
        };
        let value = serde_json::to_value(&cmd).unwrap();
        assert!(value.get("duration").is_none());
        assert_eq!(cmd.func(), "btnVal");
        assert_eq!(cmd.path(), "/");
    }

    #[test]
    fn test_numeric_button_accepted() {
        let cmd: Command =
            serde_json::from_str(r#"{"func":"btnVal","btnVal":4,"action":"release","duration":310.5,"path":"/tv"}"#)
                .unwrap();
        assert_eq!(
            cmd,
            Command::BtnVal {
                button: "4".to_string(),
                action: ButtonAction::Release,
                duration: Some("310.5".to_string()),
                path: "/tv".to_string(),
            }
        );
    }

    #[test]
    fn test_test_send_type_field() {
        let cmd = Command::TestSend {
            kind: "NEC".to_string(),
            address: "4".to_string(),
            value: "12".to_string(),
            path: "/test".to_string(),
        };
        let value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(value["type"], "NEC");
        assert_eq!(value["address"], "4");
        assert_eq!(value["func"], "test_send");
    }
}
