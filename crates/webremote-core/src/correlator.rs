//! Request correlator
//!
//! Request-style interactions (WiFi status, WiFi scan, IR learn, IR test
//! send) show a pending indicator until the device answers. The correlator
//! tracks one state per interaction kind and maps each response to the
//! kind that expects it.
//!
//! Without a configured timeout a request that is never answered stays
//! pending until the user retriggers it. With
//! [`CorrelatorConfig::request_timeout_ms`] set, the page schedules a timer
//! alongside the request and [`Correlator::expire`] moves it to
//! [`RequestState::TimedOut`].

use std::collections::HashMap;

use crate::codec::Response;
use crate::host::TimerKey;

/// Logical request kinds; each is single-outstanding by page convention
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// `get_wifi` / `config_update` → `wifi_resp`
    WifiStatus,
    /// `scan_wifi` → `wifi-ssids`
    WifiScan,
    /// `ir_get` → `ir_resp`
    IrLearn,
    /// `test_send` → `send_resp`
    TestSend,
}

/// Lifecycle of one request kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    /// Awaiting a response; `timeout` is the pending timeout timer, if any
    Pending { timeout: Option<TimerKey> },
    Done,
    /// Answered, but without usable data
    Failed,
    TimedOut,
}

/// How a response resolved its request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The response carried no usable data (e.g. an IR read with no type)
    Failed,
}

/// Result of matching a response
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub kind: RequestKind,
    pub outcome: Outcome,
    /// Whether a request of this kind was pending when the response arrived
    pub was_pending: bool,
    /// Timeout timer the caller should cancel
    pub timeout: Option<TimerKey>,
}

/// Correlator settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CorrelatorConfig {
    /// Give up on a request after this many milliseconds; `None` waits forever
    pub request_timeout_ms: Option<u32>,
}

/// Per-kind request tracker
#[derive(Debug, Default)]
pub struct Correlator {
    config: CorrelatorConfig,
    states: HashMap<RequestKind, RequestState>,
}

impl Correlator {
    pub fn new(config: CorrelatorConfig) -> Self {
        Self {
            config,
            states: HashMap::new(),
        }
    }

    /// Configured request timeout
    #[inline]
    pub fn timeout_ms(&self) -> Option<u32> {
        self.config.request_timeout_ms
    }

    pub fn state(&self, kind: RequestKind) -> RequestState {
        self.states.get(&kind).copied().unwrap_or(RequestState::Idle)
    }

    #[inline]
    pub fn is_pending(&self, kind: RequestKind) -> bool {
        matches!(self.state(kind), RequestState::Pending { .. })
    }

    /// Mark `kind` pending.
    ///
    /// Returns the timeout timer of a request of the same kind that is being
    /// replaced, so the caller can cancel it.
    pub fn begin(&mut self, kind: RequestKind, timeout: Option<TimerKey>) -> Option<TimerKey> {
        let previous = self.states.insert(kind, RequestState::Pending { timeout });
        match previous {
            Some(RequestState::Pending { timeout }) => timeout,
            _ => None,
        }
    }

    /// Match a response to the request kind that expects it.
    ///
    /// Responses are applied even when nothing was pending (the device also
    /// pushes `wifi_resp` after a configuration change); `was_pending`
    /// tells the two cases apart. Button and unknown responses are not
    /// request-style and return `None`.
    pub fn resolve(&mut self, response: &Response) -> Option<Resolution> {
        let (kind, outcome) = match response {
            Response::WifiResp { .. } => (RequestKind::WifiStatus, Outcome::Completed),
            Response::WifiSsids { .. } => (RequestKind::WifiScan, Outcome::Completed),
            Response::IrResp { kind, .. } if kind.is_empty() => (RequestKind::IrLearn, Outcome::Failed),
            Response::IrResp { .. } => (RequestKind::IrLearn, Outcome::Completed),
            Response::SendResp {} => (RequestKind::TestSend, Outcome::Completed),
            Response::BtnResp { .. } | Response::Unknown => return None,
        };

        let next = match outcome {
            Outcome::Completed => RequestState::Done,
            Outcome::Failed => RequestState::Failed,
        };
        let (was_pending, timeout) = match self.states.insert(kind, next) {
            Some(RequestState::Pending { timeout }) => (true, timeout),
            _ => (false, None),
        };

        Some(Resolution {
            kind,
            outcome,
            was_pending,
            timeout,
        })
    }

    /// The timeout for `kind` fired. Returns `true` if the request was still
    /// pending and is now timed out.
    pub fn expire(&mut self, kind: RequestKind) -> bool {
        if self.is_pending(kind) {
            self.states.insert(kind, RequestState::TimedOut);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Ssid;

    fn ir_resp(kind: &str) -> Response {
        Response::IrResp {
            row: "0".to_string(),
            kind: kind.to_string(),
            address: "1".to_string(),
            value: "2".to_string(),
            delay: "0".to_string(),
        }
    }

    #[test]
    fn test_pending_then_done() {
        let mut c = Correlator::default();
        assert_eq!(c.state(RequestKind::WifiScan), RequestState::Idle);
        c.begin(RequestKind::WifiScan, None);
        assert!(c.is_pending(RequestKind::WifiScan));

        let res = c
            .resolve(&Response::WifiSsids {
                ssids: vec![Ssid { name: "Home".to_string() }],
            })
            .unwrap();
        assert_eq!(res.kind, RequestKind::WifiScan);
        assert_eq!(res.outcome, Outcome::Completed);
        assert!(res.was_pending);
        assert_eq!(c.state(RequestKind::WifiScan), RequestState::Done);
    }

    #[test]
    fn test_empty_ir_type_fails() {
        let mut c = Correlator::default();
        c.begin(RequestKind::IrLearn, None);
        let res = c.resolve(&ir_resp("")).unwrap();
        assert_eq!(res.outcome, Outcome::Failed);
        assert_eq!(c.state(RequestKind::IrLearn), RequestState::Failed);

        c.begin(RequestKind::IrLearn, None);
        assert_eq!(c.resolve(&ir_resp("NEC")).unwrap().outcome, Outcome::Completed);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut c = Correlator::default();
        c.begin(RequestKind::WifiScan, None);
        c.begin(RequestKind::WifiStatus, None);
        c.resolve(&Response::SendResp {});
        assert!(c.is_pending(RequestKind::WifiScan));
        assert!(c.is_pending(RequestKind::WifiStatus));
    }

    #[test]
    fn test_unsolicited_response() {
        let mut c = Correlator::default();
        let res = c.resolve(&Response::SendResp {}).unwrap();
        assert!(!res.was_pending);
        assert_eq!(res.timeout, None);
    }

    #[test]
    fn test_button_responses_not_correlated() {
        let mut c = Correlator::default();
        let reply = Response::BtnResp {
            button: None,
            action: None,
            redirect: None,
        };
        assert_eq!(c.resolve(&reply), None);
        assert_eq!(c.resolve(&Response::Unknown), None);
    }

    #[test]
    fn test_timeout_lifecycle() {
        let mut c = Correlator::new(CorrelatorConfig { request_timeout_ms: Some(5000) });
        assert_eq!(c.timeout_ms(), Some(5000));

        assert_eq!(c.begin(RequestKind::TestSend, Some(TimerKey(1))), None);
        assert_eq!(c.begin(RequestKind::TestSend, Some(TimerKey(2))), Some(TimerKey(1)));

        assert!(c.expire(RequestKind::TestSend));
        assert_eq!(c.state(RequestKind::TestSend), RequestState::TimedOut);
        assert!(!c.expire(RequestKind::TestSend));

        // A late answer still resolves
        let res = c.resolve(&Response::SendResp {}).unwrap();
        assert!(!res.was_pending);
        assert_eq!(c.state(RequestKind::TestSend), RequestState::Done);
    }

    #[test]
    fn test_resolve_returns_timeout_to_cancel() {
        let mut c = Correlator::default();
        c.begin(RequestKind::WifiStatus, Some(TimerKey(9)));
        let res = c
            .resolve(&Response::WifiResp {
                host: String::new(),
                ssid: String::new(),
                ip: String::new(),
                timezone: String::new(),
            })
            .unwrap();
        assert_eq!(res.timeout, Some(TimerKey(9)));
    }
}
