//! Browser bindings for the IR remote web pages
//!
//! Each device page loads this module and constructs one panel. The panel
//! owns a page controller from `webremote-core`, a [`WebHost`] that gives
//! it the DOM, the shared WebSocket and timers, and the event listeners
//! that feed it.
//!
//! ## Module Structure
//!
//! - `transport` - Bindings to the page's WebSocket helper (`openWS` & co.)
//! - `host` - `Host` implementation over `web-sys`
//! - `events` - Listener bookkeeping and DOM event decoding
//! - `panels` - The `#[wasm_bindgen]` entry points, one per page
//!
//! ## Transport Contract
//!
//! The WebSocket itself is owned by a small script shared by all pages. It
//! exposes `openWS()`, `sendToWS(text)` and `isWSOpen()` and dispatches two
//! `CustomEvent`s on `document`: `ws_state` (detail `{obj: {open}}`) and
//! `ws_message` (detail `{message}`).

// =============================================================================
// Module declarations
// =============================================================================

pub(crate) mod events;
pub(crate) mod host;
mod panels;
pub(crate) mod transport;

// =============================================================================
// Public re-exports
// =============================================================================

pub use host::WebHost;
pub use panels::{ConfigPanel, LearnPanel, RemotePanel, SetupPanel, TestPanel};
