//! WiFi configuration page

use std::collections::BTreeMap;

use super::link::{Link, TimerPurpose};
use super::{option, Page};
use crate::bindings::{ConfigBindings, PageConfig};
use crate::codec::{Command, Response};
use crate::constants::{CHOOSE_PLACEHOLDER, NOTICE_TIMED_OUT, SCAN_PLACEHOLDER, SCAN_TIMED_OUT};
use crate::correlator::{RequestKind, RequestState};
use crate::host::{Host, TimerKey};
use crate::text::escape_html;

/// Form fields that would collide with the envelope's own keys
const RESERVED_FIELDS: [&str; 2] = ["func", "path"];

/// Controller for the WiFi configuration page
pub struct ConfigPage<H: Host> {
    link: Link<H>,
    bindings: ConfigBindings,
}

impl<H: Host> ConfigPage<H> {
    pub fn new(host: H, bindings: ConfigBindings, config: PageConfig) -> Self {
        Self {
            link: Link::new(host, config, "config"),
            bindings,
        }
    }

    pub fn host(&self) -> &H {
        self.link.host()
    }

    pub fn bindings(&self) -> &ConfigBindings {
        &self.bindings
    }

    pub fn request_state(&self, kind: RequestKind) -> RequestState {
        self.link.request_state(kind)
    }

    /// Ask the device for its current settings
    pub fn refresh(&mut self) {
        let cmd = Command::GetWifi {
            path: self.link.path(),
        };
        self.link.request(RequestKind::WifiStatus, &cmd);
    }

    /// Scan button: show the placeholder and start a scan
    pub fn scan(&mut self) {
        self.link
            .host()
            .set_html(&self.bindings.networks, &option(SCAN_PLACEHOLDER));
        let cmd = Command::ScanWifi {
            path: self.link.path(),
        };
        self.link.request(RequestKind::WifiScan, &cmd);
    }

    /// Update button: send every input of the page.
    ///
    /// The device answers with `wifi_resp` only when the WiFi connection is
    /// kept, so this is not tracked as a pending request.
    pub fn update(&mut self) {
        self.link.host().set_html(&self.bindings.ip, "");

        let mut fields = BTreeMap::new();
        for (name, value) in self.link.host().form_fields() {
            if name.is_empty() || RESERVED_FIELDS.contains(&name.as_str()) {
                self.link.log(&format!("skipping input {:?}", name));
                continue;
            }
            fields.insert(name, value);
        }

        let cmd = Command::ConfigUpdate {
            path: self.link.path(),
            fields,
        };
        self.link.send(&cmd);
    }

    /// Network list changed: copy the chosen network into the SSID input
    pub fn select_network(&mut self) {
        let host = self.link.host();
        let index = match host.selected_index(&self.bindings.networks) {
            Some(i) if i > 0 => i,
            _ => return,
        };
        if let Some(name) = host.option_value(&self.bindings.networks, index) {
            host.set_value(&self.bindings.ssid, &name);
        }
    }

    fn apply(&mut self, response: Response) {
        self.link.resolve(&response);
        let host = self.link.host();

        match response {
            Response::WifiResp {
                host: hostname,
                ssid,
                ip,
                timezone,
            } => {
                host.set_value(&self.bindings.hostname, &hostname);
                host.set_value(&self.bindings.ssid, &ssid);
                host.set_html(&self.bindings.ip, &escape_html(&ip));
                host.set_value(&self.bindings.timezone, &timezone);
            }
            Response::WifiSsids { ssids } => {
                let mut html = option(CHOOSE_PLACEHOLDER);
                for ssid in &ssids {
                    html.push_str(&option(&escape_html(&ssid.name)));
                }
                host.set_html(&self.bindings.networks, &html);
            }
            _ => {}
        }
    }

    fn show_timeout(&self, kind: RequestKind) {
        let host = self.link.host();
        match kind {
            RequestKind::WifiScan => host.set_html(&self.bindings.networks, &option(SCAN_TIMED_OUT)),
            RequestKind::WifiStatus => host.set_html(&self.bindings.ip, NOTICE_TIMED_OUT),
            _ => {}
        }
    }
}

impl<H: Host> Page for ConfigPage<H> {
    fn on_connection(&mut self, open: bool) {
        if open {
            self.refresh();
        }
    }

    fn on_message(&mut self, text: &str) {
        if let Some(response) = self.link.decode(text) {
            self.apply(response);
        }
    }

    fn on_timer(&mut self, key: TimerKey) {
        if let Some(TimerPurpose::RequestTimeout(kind)) = self.link.fire(key) {
            if self.link.expire(kind) {
                self.show_timeout(kind);
            }
        }
    }
}
