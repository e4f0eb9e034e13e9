//! Remote control page
//!
//! Wires the gesture encoder to the command buttons, keeps the LED in step
//! with the connection and the device's replies, and follows redirects
//! carried by button responses.

use std::collections::HashMap;

use super::link::{Link, TimerPurpose};
use super::Page;
use crate::bindings::{PageConfig, RemoteBindings};
use crate::codec::{format_duration, ButtonAction, Command, DeviceAction, Response};
use crate::gesture::{ButtonGesture, GestureEffect, GestureEncoder, PointerInput};
use crate::host::{Host, TimerKey};
use crate::led::{reflect, LedAction, LedState};
use crate::redirect::{plan_redirect, Navigation};

/// Controller for the remote control page
pub struct RemotePage<H: Host> {
    link: Link<H>,
    bindings: RemoteBindings,
    encoder: GestureEncoder,
    /// Pending hold timer per pointer id
    hold_timers: HashMap<i32, TimerKey>,
    last_action: Option<LedAction>,
}

impl<H: Host> RemotePage<H> {
    pub fn new(host: H, bindings: RemoteBindings, config: PageConfig) -> Self {
        Self::with_encoder(host, bindings, config, GestureEncoder::new())
    }

    pub fn with_encoder(
        host: H,
        bindings: RemoteBindings,
        config: PageConfig,
        encoder: GestureEncoder,
    ) -> Self {
        let page = Self {
            link: Link::new(host, config, "remote"),
            bindings,
            encoder,
            hold_timers: HashMap::new(),
            last_action: None,
        };
        page.show_led();
        page
    }

    pub fn host(&self) -> &H {
        self.link.host()
    }

    pub fn bindings(&self) -> &RemoteBindings {
        &self.bindings
    }

    pub fn encoder(&self) -> &GestureEncoder {
        &self.encoder
    }

    /// Indicator state as currently rendered
    pub fn led_state(&self) -> LedState {
        reflect(self.link.host().is_open(), self.last_action)
    }

    /// Feed a pointer event from a button
    pub fn pointer(&mut self, input: &PointerInput) {
        let effects = self.encoder.handle(input);
        self.apply_effects(effects);
    }

    fn apply_effects(&mut self, effects: Vec<GestureEffect>) {
        for effect in effects {
            match effect {
                GestureEffect::StartHold {
                    pointer_id,
                    delay_ms,
                } => {
                    let key = self.link.schedule(TimerPurpose::Hold(pointer_id), delay_ms);
                    if let Some(stale) = self.hold_timers.insert(pointer_id, key) {
                        self.link.cancel(stale);
                    }
                }
                GestureEffect::CancelHold { pointer_id } => {
                    if let Some(key) = self.hold_timers.remove(&pointer_id) {
                        self.link.cancel(key);
                    }
                }
                GestureEffect::Emit(gesture) => self.emit(gesture),
            }
        }
    }

    fn emit(&mut self, gesture: ButtonGesture) {
        if gesture.action == ButtonAction::Click {
            self.last_action = Some(LedAction::ClickInFlight);
            self.show_led();
        }
        let cmd = Command::BtnVal {
            button: gesture.button,
            action: gesture.action,
            duration: gesture.duration_ms.map(format_duration),
            path: self.link.path(),
        };
        self.link.send(&cmd);
    }

    fn show_led(&self) {
        let markup = self.led_state().markup();
        self.link.host().set_html(&self.bindings.led, &markup);
    }

    fn apply(&mut self, response: Response) {
        let Response::BtnResp {
            button,
            action,
            redirect,
        } = response
        else {
            return;
        };

        self.last_action = match action {
            Some(DeviceAction::Press) => Some(LedAction::Press),
            Some(DeviceAction::Busy) => Some(LedAction::Busy),
            Some(DeviceAction::NoRepeat) => {
                let effects = self.encoder.suppress_repeat(button.as_deref());
                self.apply_effects(effects);
                None
            }
            _ => None,
        };
        self.show_led();

        let host = self.link.host();
        match plan_redirect(redirect.as_deref(), action, &host.origin()) {
            Some(Navigation::NewWindow { url, target }) => {
                self.link.log(&format!("redirect to {} in {}", url, target));
                host.open_window(&url, &target);
            }
            Some(Navigation::SameDocument { url }) => {
                self.link.log(&format!("redirect to {}", url));
                host.navigate(&url);
            }
            None => {}
        }
    }
}

impl<H: Host> Page for RemotePage<H> {
    fn on_connection(&mut self, open: bool) {
        self.link.log(if open { "connected" } else { "disconnected" });
        self.last_action = None;
        self.show_led();
    }

    fn on_message(&mut self, text: &str) {
        if let Some(response) = self.link.decode(text) {
            self.apply(response);
        }
    }

    fn on_timer(&mut self, key: TimerKey) {
        let Some(TimerPurpose::Hold(pointer_id)) = self.link.fire(key) else {
            return;
        };
        if self.hold_timers.get(&pointer_id) == Some(&key) {
            self.hold_timers.remove(&pointer_id);
        }
        if let Some(gesture) = self.encoder.hold_elapsed(pointer_id) {
            self.emit(gesture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PointerPhase;

    use crate::mock::MockHost;

    fn page() -> RemotePage<MockHost> {
        RemotePage::new(MockHost::new("/remote/tv"), RemoteBindings::default(), PageConfig::default())
    }

    fn down(id: i32, button: &str, t: f64) -> PointerInput {
        PointerInput::command(PointerPhase::Down, id, button, t)
    }

    fn up(id: i32, button: &str, t: f64) -> PointerInput {
        PointerInput::command(PointerPhase::Up, id, button, t)
    }

    #[test]
    fn test_led_rendered_on_load() {
        let page = page();
        assert_eq!(page.led_state(), LedState::Off);
        assert_eq!(page.host().html("led"), Some(LedState::Off.markup()));
    }

    #[test]
    fn test_click_sends_once_and_lights_led() {
        let mut page = page();
        page.pointer(&down(1, "3", 1000.0));
        assert_eq!(page.host().pending_timers().len(), 1);
        page.pointer(&up(1, "3", 1120.5));

        assert!(page.host().pending_timers().is_empty());
        let sent = page.host().sent_json();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["func"], "btnVal");
        assert_eq!(sent[0]["btnVal"], "3");
        assert_eq!(sent[0]["action"], "click");
        assert_eq!(sent[0]["duration"], "120.5");
        assert_eq!(sent[0]["path"], "/remote/tv");
        assert_eq!(page.led_state(), LedState::On);
    }

    #[test]
    fn test_hold_then_release() {
        let mut page = page();
        page.pointer(&down(1, "0", 0.0));
        let key = page.host().fire_next().unwrap();
        page.on_timer(key);
        page.pointer(&up(1, "0", 900.0));

        let sent = page.host().sent_json();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0]["action"], "press");
        assert!(sent[0].get("duration").is_none());
        assert_eq!(sent[1]["action"], "release");
        assert_eq!(sent[1]["duration"], "900");
    }

    #[test]
    fn test_stale_hold_timer_ignored() {
        let mut page = page();
        page.pointer(&down(1, "0", 0.0));
        let key = page.host().pending_timers()[0].0;
        page.pointer(&up(1, "0", 100.0));
        page.on_timer(key);
        assert_eq!(page.host().sent().len(), 1);
    }

    #[test]
    fn test_btn_resp_drives_led() {
        let mut page = page();
        page.on_message(r#"{"func":"btn_resp","action":"press"}"#);
        assert_eq!(page.led_state(), LedState::On);
        page.on_message(r#"{"func":"btn_resp","action":"busy"}"#);
        assert_eq!(page.led_state(), LedState::Busy);
        page.on_message(r#"{"func":"btn_resp"}"#);
        assert_eq!(page.led_state(), LedState::Off);

        page.host().set_open(false);
        page.on_connection(false);
        assert_eq!(page.host().html("led"), Some(LedState::Disconnected.markup()));
    }

    #[test]
    fn test_no_repeat_swallows_rest_of_gesture() {
        let mut page = page();
        page.pointer(&down(1, "2", 0.0));
        page.on_message(r#"{"func":"btn_resp","action":"no-repeat"}"#);
        assert!(page.encoder().is_idle());
        assert!(page.host().pending_timers().is_empty());

        page.pointer(&up(1, "2", 50.0));
        assert!(page.host().sent().is_empty());
    }

    #[test]
    fn test_redirects() {
        let mut page = page();
        page.on_message(r#"{"func":"btn_resp","action":"click","redirect":"/remote/radio"}"#);
        assert_eq!(page.host().navigations(), vec!["http://remote.local/remote/radio".to_string()]);

        page.on_message(r#"{"func":"btn_resp","action":"click","redirect":"https://example.com/"}"#);
        assert_eq!(
            page.host().windows(),
            vec![("https://example.com/".to_string(), "redirect".to_string())]
        );

        page.on_message(r#"{"func":"btn_resp","action":"busy","redirect":"/elsewhere"}"#);
        page.on_message(r#"{"func":"btn_resp","action":"click","redirect":""}"#);
        assert_eq!(page.host().navigations().len(), 1);
        assert_eq!(page.host().windows().len(), 1);
    }
}
