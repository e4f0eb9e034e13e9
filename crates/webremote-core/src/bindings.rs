//! Page configuration
//!
//! Each page controller is parameterized by the ids of the elements it
//! reads and writes. The defaults match the templates served by the
//! device firmware.

use crate::codec::CodecConfig;
use crate::constants::LED_ELEMENT_ID;
use crate::correlator::CorrelatorConfig;

/// Settings shared by every controller that talks to the device
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageConfig {
    pub codec: CodecConfig,
    pub correlator: CorrelatorConfig,
}

impl PageConfig {
    /// Default settings with a request timeout enabled
    pub fn with_request_timeout(timeout_ms: u32) -> Self {
        Self {
            correlator: CorrelatorConfig {
                request_timeout_ms: Some(timeout_ms),
            },
            ..Self::default()
        }
    }
}

/// WiFi configuration page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigBindings {
    pub hostname: String,
    pub ssid: String,
    /// Text element showing the current IP address
    pub ip: String,
    pub timezone: String,
    /// Select listing scanned networks
    pub networks: String,
    pub scan_button: String,
    pub update_button: String,
}

impl Default for ConfigBindings {
    fn default() -> Self {
        Self {
            hostname: "hostname".to_string(),
            ssid: "ssid".to_string(),
            ip: "ip".to_string(),
            timezone: "timezone".to_string(),
            networks: "ssids".to_string(),
            scan_button: "scan".to_string(),
            update_button: "update".to_string(),
        }
    }
}

/// Button setup page with IR learning per action row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearnBindings {
    pub notice: String,
    /// Button label input (button pages)
    pub label: String,
    /// Menu name input (menu pages)
    pub name: String,
    /// Table holding one row of inputs per action
    pub steps: String,
    /// Form submitted after a code was captured
    pub form: String,
    pub type_input: String,
    pub address_input: String,
    pub value_input: String,
    pub delay_input: String,
}

impl Default for LearnBindings {
    fn default() -> Self {
        Self {
            notice: "irget".to_string(),
            label: "lbl".to_string(),
            name: "name".to_string(),
            steps: "steps".to_string(),
            form: "actForm".to_string(),
            type_input: "typ".to_string(),
            address_input: "add".to_string(),
            value_input: "val".to_string(),
            delay_input: "dly".to_string(),
        }
    }
}

/// IR test page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestBindings {
    pub notice: String,
    pub kind: String,
    pub address: String,
    pub value: String,
}

impl Default for TestBindings {
    fn default() -> Self {
        Self {
            notice: "ntc".to_string(),
            kind: "typ".to_string(),
            address: "add".to_string(),
            value: "val".to_string(),
        }
    }
}

/// Remote control page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteBindings {
    pub led: String,
    /// Selector matching every command button
    pub buttons: String,
}

impl Default for RemoteBindings {
    fn default() -> Self {
        Self {
            led: LED_ELEMENT_ID.to_string(),
            buttons: ".buttons button".to_string(),
        }
    }
}

/// Remote/menu setup page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupBindings {
    /// Done button; its `class` is `saved` when nothing is pending
    pub done: String,
}

impl Default for SetupBindings {
    fn default() -> Self {
        Self {
            done: "done".to_string(),
        }
    }
}
