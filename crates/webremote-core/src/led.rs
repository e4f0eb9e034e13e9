//! LED/status reflector
//!
//! The remote page shows a small disc reflecting the connection and the
//! last button action. The state is never stored authoritatively; pages
//! recompute it with [`reflect`] on every action and connection change.

/// Last action relevant to the indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedAction {
    /// The device reported a press in progress
    Press,
    /// A click was sent and has not been answered yet
    ClickInFlight,
    /// The device reported it is busy
    Busy,
}

/// Rendered indicator state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedState {
    /// WebSocket closed (black disc, distinct from `Off`)
    Disconnected,
    Off,
    On,
    Busy,
}

/// Derive the indicator from connection state and last action
pub fn reflect(connection_open: bool, last_action: Option<LedAction>) -> LedState {
    if !connection_open {
        return LedState::Disconnected;
    }
    match last_action {
        Some(LedAction::Press) | Some(LedAction::ClickInFlight) => LedState::On,
        Some(LedAction::Busy) => LedState::Busy,
        None => LedState::Off,
    }
}

impl LedState {
    /// SVG markup for the indicator element
    pub fn markup(&self) -> String {
        let (fill, stroke) = match self {
            LedState::Disconnected => ("black", "black"),
            LedState::Off => ("#660000", "white"),
            LedState::On => ("red", "white"),
            LedState::Busy => ("red", "orange"),
        };
        format!(
            "<svg viewbox='0 0 25 25' width='25' height='25' xmlns='http://www.w3.org/2000/svg'>\
             <circle cx='12' cy='12' r='12' fill='{}' stroke='{}' stroke-width='3' /></svg>",
            fill, stroke
        )
    }
}
