//! Browser-side control logic for the IR remote web interface
//!
//! The device serves a handful of pages (WiFi configuration, IR learning,
//! IR test, button setup and the remote itself). Each page exchanges small
//! JSON envelopes with the device over a single WebSocket owned by an
//! external transport helper. This crate holds everything that does not
//! touch the browser directly, so it builds and tests natively.
//!
//! ## Module Structure
//!
//! - `codec` - Command/response envelopes and their JSON encoding
//! - `gesture` - Press/hold/release encoder for command buttons
//! - `correlator` - Tracks outstanding requests per interaction kind
//! - `led` - Status indicator derived from connection and last action
//! - `redirect` - Navigation on button responses
//! - `pages` - Per-page controllers wired through the [`Host`] seam
//! - `host` - The DOM/transport/timer abstraction implemented by the browser crate
//!
//! ## Event Flow
//!
//! Pointer and click events enter a page controller, which builds a
//! [`Command`], encodes it and hands the text to [`Host::send`]. Inbound
//! frames go the other way: [`Codec::decode`] produces a [`Response`], the
//! correlator matches it to the outstanding request and the page writes the
//! result back through the host.

pub mod bindings;
pub mod codec;
pub mod constants;
pub mod correlator;
pub mod error;
pub mod gesture;
pub mod host;
pub mod led;
pub mod pages;
pub mod redirect;
pub mod text;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// =============================================================================
// Public re-exports
// =============================================================================

pub use bindings::{
    ConfigBindings, LearnBindings, PageConfig, RemoteBindings, SetupBindings, TestBindings,
};
pub use codec::{ButtonAction, Codec, CodecConfig, Command, DeviceAction, Response, Ssid};
pub use correlator::{Correlator, CorrelatorConfig, Outcome, RequestKind, RequestState, Resolution};
pub use error::{DecodeError, EncodeError, ValidationError};
pub use gesture::{ButtonGesture, GestureEffect, GestureEncoder, GesturePhase, PointerInput, PointerPhase};
pub use host::{Host, TimerKey};
pub use led::{reflect, LedAction, LedState};
pub use pages::{ConfigPage, LearnPage, Page, RemotePage, SetupPage, TestPage};
pub use redirect::{plan_redirect, resolve_redirect, Navigation};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockHost;
