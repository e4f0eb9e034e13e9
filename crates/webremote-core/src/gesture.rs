//! Gesture encoder for command buttons
//!
//! Turns raw pointer events on a `btnVal` button into button commands:
//!
//! ```text
//! Idle ──down(primary)──▶ ArmedShort ──hold timer──▶ Held
//!  ▲                          │                        │
//!  └──── up: click ───────────┘                        │
//!  └──── up: release ──────────────────────────────────┘
//!  └──── leave: cancel (from either) ──────────────────┘
//! ```
//!
//! State is kept per pointer id, so two fingers on two buttons are two
//! independent gestures. The encoder never touches timers itself; it
//! returns [`GestureEffect`]s and the caller schedules or cancels the hold
//! timer, then reports expiry through [`GestureEncoder::hold_elapsed`].

use std::collections::HashMap;

use crate::codec::ButtonAction;
use crate::constants::{COMMAND_BUTTON_NAME, HOLD_THRESHOLD_MS, PRIMARY_BUTTONS};

/// Kind of pointer event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Up,
    Leave,
}

/// A pointer event as seen by the encoder
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    /// `PointerEvent.pointerId`
    pub pointer_id: i32,
    /// `PointerEvent.buttons` bitmask
    pub buttons: u16,
    /// Event timestamp in milliseconds
    pub timestamp: f64,
    /// `name` attribute of the target element
    pub target_name: String,
    /// `value` attribute of the target element (the button index)
    pub target_value: String,
}

impl PointerInput {
    /// Convenience constructor for a primary-button event on a command button
    pub fn command(phase: PointerPhase, pointer_id: i32, button: &str, timestamp: f64) -> Self {
        Self {
            phase,
            pointer_id,
            buttons: if phase == PointerPhase::Down { PRIMARY_BUTTONS } else { 0 },
            timestamp,
            target_name: COMMAND_BUTTON_NAME.to_string(),
            target_value: button.to_string(),
        }
    }
}

/// A finished gesture step to be sent as a `btnVal` command
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonGesture {
    pub button: String,
    pub action: ButtonAction,
    /// Milliseconds since pointer-down; `None` for `press`
    pub duration_ms: Option<f64>,
}

/// What the caller must do after feeding the encoder an event
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEffect {
    /// Schedule the hold timer for this pointer
    StartHold { pointer_id: i32, delay_ms: u32 },
    /// Cancel the hold timer for this pointer (no-op if it already fired)
    CancelHold { pointer_id: i32 },
    /// Send this gesture step to the device
    Emit(ButtonGesture),
}

/// Observable state of one pointer's gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Pointer down, hold timer pending
    ArmedShort,
    /// Hold timer fired, `press` sent
    Held,
}

#[derive(Clone, Debug)]
struct Tracked {
    button: String,
    started: f64,
    held: bool,
}

/// Per-pointer press/hold/release state machine
#[derive(Debug)]
pub struct GestureEncoder {
    active: HashMap<i32, Tracked>,
    hold_threshold_ms: u32,
}

impl Default for GestureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEncoder {
    /// Create an encoder with the standard hold threshold
    pub fn new() -> Self {
        Self::with_hold_threshold(HOLD_THRESHOLD_MS)
    }

    pub fn with_hold_threshold(hold_threshold_ms: u32) -> Self {
        Self {
            active: HashMap::new(),
            hold_threshold_ms,
        }
    }

    /// Current phase of the gesture for `pointer_id`
    pub fn phase(&self, pointer_id: i32) -> GesturePhase {
        match self.active.get(&pointer_id) {
            None => GesturePhase::Idle,
            Some(t) if t.held => GesturePhase::Held,
            Some(_) => GesturePhase::ArmedShort,
        }
    }

    /// Whether no gesture is in flight on any pointer
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Feed one pointer event
    pub fn handle(&mut self, input: &PointerInput) -> Vec<GestureEffect> {
        if input.target_name != COMMAND_BUTTON_NAME {
            return Vec::new();
        }

        match input.phase {
            PointerPhase::Down => self.pointer_down(input),
            PointerPhase::Up => self.pointer_up(input),
            PointerPhase::Leave => self.pointer_leave(input),
        }
    }

    /// The hold timer for `pointer_id` fired.
    ///
    /// Returns the `press` step if the pointer is still armed; a timer that
    /// outlived its gesture yields nothing.
    pub fn hold_elapsed(&mut self, pointer_id: i32) -> Option<ButtonGesture> {
        let tracked = self.active.get_mut(&pointer_id)?;
        if tracked.held {
            return None;
        }
        tracked.held = true;
        Some(ButtonGesture {
            button: tracked.button.clone(),
            action: ButtonAction::Press,
            duration_ms: None,
        })
    }

    /// Forget the gestures on `button` (the device answered `no-repeat`).
    ///
    /// Without a button every gesture in flight is dropped. The following
    /// pointer-up or leave of a dropped gesture then emits nothing.
    pub fn suppress_repeat(&mut self, button: Option<&str>) -> Vec<GestureEffect> {
        let dropped: Vec<i32> = self
            .active
            .iter()
            .filter(|(_, t)| button.map_or(true, |b| t.button == b))
            .map(|(id, _)| *id)
            .collect();
        let mut armed = Vec::new();
        for pointer_id in dropped {
            if let Some(tracked) = self.active.remove(&pointer_id) {
                if !tracked.held {
                    armed.push(pointer_id);
                }
            }
        }
        armed.sort_unstable();
        armed
            .into_iter()
            .map(|pointer_id| GestureEffect::CancelHold { pointer_id })
            .collect()
    }

    fn pointer_down(&mut self, input: &PointerInput) -> Vec<GestureEffect> {
        let mut effects = Vec::new();
        if let Some(previous) = self.active.remove(&input.pointer_id) {
            if !previous.held {
                effects.push(GestureEffect::CancelHold {
                    pointer_id: input.pointer_id,
                });
            }
        }

        if input.buttons != PRIMARY_BUTTONS {
            return effects;
        }

        self.active.insert(
            input.pointer_id,
            Tracked {
                button: input.target_value.clone(),
                started: input.timestamp,
                held: false,
            },
        );
        effects.push(GestureEffect::StartHold {
            pointer_id: input.pointer_id,
            delay_ms: self.hold_threshold_ms,
        });
        effects
    }

    fn pointer_up(&mut self, input: &PointerInput) -> Vec<GestureEffect> {
        let tracked = match self.active.remove(&input.pointer_id) {
            Some(t) => t,
            None => return Vec::new(),
        };
        let duration = input.timestamp - tracked.started;

        if tracked.held {
            vec![GestureEffect::Emit(ButtonGesture {
                button: tracked.button,
                action: ButtonAction::Release,
                duration_ms: Some(duration),
            })]
        } else {
            vec![
                GestureEffect::CancelHold {
                    pointer_id: input.pointer_id,
                },
                GestureEffect::Emit(ButtonGesture {
                    button: tracked.button,
                    action: ButtonAction::Click,
                    duration_ms: Some(duration),
                }),
            ]
        }
    }

    fn pointer_leave(&mut self, input: &PointerInput) -> Vec<GestureEffect> {
        let tracked = match self.active.remove(&input.pointer_id) {
            Some(t) => t,
            None => return Vec::new(),
        };

        let mut effects = Vec::new();
        if !tracked.held {
            effects.push(GestureEffect::CancelHold {
                pointer_id: input.pointer_id,
            });
        }
        effects.push(GestureEffect::Emit(ButtonGesture {
            button: tracked.button,
            action: ButtonAction::Cancel,
            duration_ms: Some(input.timestamp - tracked.started),
        }));
        effects
    }
}
