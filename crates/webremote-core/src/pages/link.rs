//! Shared request/response and timer plumbing for the pages

use std::collections::HashMap;

use crate::bindings::PageConfig;
use crate::codec::{Codec, Command, Response};
use crate::correlator::{Correlator, RequestKind, RequestState, Resolution};
use crate::host::{Host, TimerKey};

/// Why a timer was scheduled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerPurpose {
    /// Hold threshold for a pointer
    Hold(i32),
    /// A request of this kind went unanswered
    RequestTimeout(RequestKind),
    /// Blank a transient notice
    ClearNotice,
}

/// A page's connection to the host: codec, correlator and timer table
pub(crate) struct Link<H: Host> {
    host: H,
    codec: Codec,
    correlator: Correlator,
    timers: HashMap<TimerKey, TimerPurpose>,
    next_timer: u64,
    tag: &'static str,
}

impl<H: Host> Link<H> {
    pub fn new(host: H, config: PageConfig, tag: &'static str) -> Self {
        Self {
            host,
            codec: Codec::new(config.codec),
            correlator: Correlator::new(config.correlator),
            timers: HashMap::new(),
            next_timer: 1,
            tag,
        }
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn path(&self) -> String {
        self.host.path()
    }

    pub fn log(&self, msg: &str) {
        self.host.log(&format!("[{}] {}", self.tag, msg));
    }

    /// Encode and send a command
    pub fn send(&self, command: &Command) {
        match self.codec.encode(command) {
            Ok(text) => {
                self.log(&format!("send {}", text));
                self.host.send(&text);
            }
            Err(e) => self.log(&e.to_string()),
        }
    }

    /// Send a command and mark its request kind pending
    pub fn request(&mut self, kind: RequestKind, command: &Command) {
        let timeout = self
            .correlator
            .timeout_ms()
            .map(|ms| self.schedule(TimerPurpose::RequestTimeout(kind), ms));
        if let Some(replaced) = self.correlator.begin(kind, timeout) {
            self.cancel(replaced);
        }
        self.send(command);
    }

    /// Decode a frame; failures are logged and dropped
    pub fn decode(&self, text: &str) -> Option<Response> {
        match self.codec.decode(text) {
            Ok(response) => Some(response),
            Err(e) => {
                self.log(&format!("decode failed: {} ({})", e, text));
                None
            }
        }
    }

    /// Match a response to its request and cancel the request's timeout
    pub fn resolve(&mut self, response: &Response) -> Option<Resolution> {
        let resolution = self.correlator.resolve(response)?;
        if let Some(timeout) = resolution.timeout {
            self.cancel(timeout);
        }
        Some(resolution)
    }

    pub fn request_state(&self, kind: RequestKind) -> RequestState {
        self.correlator.state(kind)
    }

    /// A request timeout fired; `true` if the request is now timed out
    pub fn expire(&mut self, kind: RequestKind) -> bool {
        let expired = self.correlator.expire(kind);
        if expired {
            self.log(&format!("{:?} timed out", kind));
        }
        expired
    }

    pub fn schedule(&mut self, purpose: TimerPurpose, delay_ms: u32) -> TimerKey {
        let key = TimerKey(self.next_timer);
        self.next_timer += 1;
        self.timers.insert(key, purpose);
        self.host.schedule(key, delay_ms);
        key
    }

    /// Cancel a timer; safe to call for fired or cancelled timers
    pub fn cancel(&mut self, key: TimerKey) {
        if self.timers.remove(&key).is_some() {
            self.host.cancel(key);
        }
    }

    /// Claim a fired timer. Stale or cancelled keys yield `None`.
    pub fn fire(&mut self, key: TimerKey) -> Option<TimerPurpose> {
        self.timers.remove(&key)
    }
}
