//! Simulated remote device
//!
//! Answers every command the pages send with the reply the firmware would
//! give, so the pages can be exercised without hardware.

use std::collections::HashMap;

use webremote_core::{resolve_redirect, ButtonAction, Codec, Command, DeviceAction, Response, Ssid};

/// A captured or transmitted IR code
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrCode {
    pub kind: String,
    pub address: String,
    pub value: String,
    pub delay: String,
}

/// Per-button settings that affect the reply
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Button {
    /// Repeats while held
    pub repeat: bool,
    /// Configured redirect, relative to the page the button is on
    pub redirect: String,
}

#[derive(Debug)]
pub struct Device {
    codec: Codec,
    pub hostname: String,
    pub ssid: String,
    pub ip: String,
    pub timezone: String,
    /// Networks reported by a scan
    pub networks: Vec<String>,
    /// Code returned by the next `ir_get`; `None` simulates an unknown code
    pub learned: Option<IrCode>,
    /// Buttons by index
    pub buttons: HashMap<String, Button>,
    /// Codes transmitted by `test_send`
    pub transmitted: Vec<IrCode>,
}

impl Device {
    pub fn new() -> Self {
        Self {
            codec: Codec::default(),
            hostname: "webremote".to_string(),
            ssid: String::new(),
            ip: "192.168.4.1".to_string(),
            timezone: "UTC".to_string(),
            networks: Vec::new(),
            learned: None,
            buttons: HashMap::new(),
            transmitted: Vec::new(),
        }
    }

    /// A device with a few networks, a learnable code and sample buttons
    pub fn demo() -> Self {
        let mut device = Self::new();
        device.networks = vec!["Home".to_string(), "Office".to_string()];
        device.learned = Some(IrCode {
            kind: "NEC".to_string(),
            address: "4".to_string(),
            value: "8".to_string(),
            delay: "100".to_string(),
        });
        device.buttons.insert(
            "0".to_string(),
            Button {
                repeat: true,
                redirect: String::new(),
            },
        );
        device.buttons.insert(
            "1".to_string(),
            Button {
                repeat: false,
                redirect: "..".to_string(),
            },
        );
        device
    }

    /// Handle one text frame; returns the reply frame, if any
    pub fn handle(&mut self, text: &str) -> Option<String> {
        let command = match self.codec.decode_command(text) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!("dropping frame: {}", e);
                return None;
            }
        };
        tracing::debug!(func = command.func(), path = command.path(), "command");

        let response = self.respond(command);
        match self.codec.encode_response(&response) {
            Ok(reply) => Some(reply),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    pub fn respond(&mut self, command: Command) -> Response {
        match command {
            Command::GetWifi { .. } => self.wifi_resp(),
            Command::ConfigUpdate { fields, .. } => {
                if let Some(host) = fields.get("hostname") {
                    self.hostname = host.clone();
                }
                if let Some(ssid) = fields.get("ssid") {
                    self.ssid = ssid.clone();
                }
                if let Some(tz) = fields.get("timezone") {
                    self.timezone = tz.clone();
                }
                tracing::info!(hostname = %self.hostname, ssid = %self.ssid, "configuration updated");
                self.wifi_resp()
            }
            Command::ScanWifi { .. } => Response::WifiSsids {
                ssids: self
                    .networks
                    .iter()
                    .map(|name| Ssid { name: name.clone() })
                    .collect(),
            },
            Command::IrGet { row, .. } => match &self.learned {
                Some(code) => Response::IrResp {
                    row,
                    kind: code.kind.clone(),
                    address: code.address.clone(),
                    value: code.value.clone(),
                    delay: code.delay.clone(),
                },
                None => Response::IrResp {
                    row,
                    kind: String::new(),
                    address: String::new(),
                    value: String::new(),
                    delay: String::new(),
                },
            },
            Command::TestSend {
                kind,
                address,
                value,
                ..
            } => {
                tracing::info!(%kind, %address, %value, "transmit");
                self.transmitted.push(IrCode {
                    kind,
                    address,
                    value,
                    delay: "0".to_string(),
                });
                Response::SendResp {}
            }
            Command::BtnVal {
                button,
                action,
                path,
                ..
            } => {
                let settings = self.buttons.get(&button).cloned().unwrap_or_default();
                let action = match action {
                    ButtonAction::Press if settings.repeat && settings.redirect.is_empty() => {
                        DeviceAction::Press
                    }
                    ButtonAction::Press => DeviceAction::NoRepeat,
                    ButtonAction::Click => DeviceAction::Click,
                    ButtonAction::Release => DeviceAction::Release,
                    ButtonAction::Cancel => DeviceAction::Cancel,
                };
                Response::BtnResp {
                    button: Some(button),
                    action: Some(action),
                    redirect: Some(resolve_redirect(&path, &settings.redirect)),
                }
            }
        }
    }

    fn wifi_resp(&self) -> Response {
        Response::WifiResp {
            host: self.hostname.clone(),
            ssid: self.ssid.clone(),
            ip: self.ip.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new()
    }
}
