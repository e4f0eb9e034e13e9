//! Page controllers
//!
//! One controller per device page. They share the request/response and
//! timer plumbing in [`link`] and differ only in their bindings and in how
//! they render responses:
//!
//! - `config` - WiFi settings and network scan
//! - `learn` - IR learning on the button setup page
//! - `ir_test` - IR code capture and test transmission
//! - `remote` - Command buttons, LED and redirects
//! - `setup` - Navigation helpers of the setup page

mod config;
mod learn;
mod link;
mod remote;
mod setup;

pub use config::ConfigPage;
pub use ir_test::TestPage;
pub use learn::LearnPage;
pub use remote::RemotePage;
pub use setup::SetupPage;

use crate::host::TimerKey;

/// Events every WebSocket-driven page reacts to
pub trait Page {
    /// The transport reported a connection state change
    fn on_connection(&mut self, open: bool);

    /// A raw text frame arrived from the device
    fn on_message(&mut self, text: &str);

    /// A timer scheduled by this page fired
    fn on_timer(&mut self, key: TimerKey);
}

/// Markup for a single select option
pub(crate) fn option(text: &str) -> String {
    format!("<option>{}</option>", text)
}
