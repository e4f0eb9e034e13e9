//! Integration tests for the page controllers
//!
//! These tests drive whole pages through the mock host:
//! - WiFi scan and settings round trips
//! - IR learning and IR test sends, including input validation
//! - Click, hold and cancel gestures on the remote page
//! - LED, redirect and timeout behaviour

use webremote_core::constants::{HOLD_THRESHOLD_MS, SENT_NOTICE_CLEAR_MS};
use webremote_core::{
    reflect, Codec, ConfigBindings, ConfigPage, DecodeError, Host, LearnBindings, LearnPage,
    LedAction, LedState, MockHost, Page, PageConfig, PointerInput, PointerPhase, RemoteBindings,
    RemotePage, RequestKind, RequestState, Response, TestBindings, TestPage, ValidationError,
};

fn remote() -> RemotePage<MockHost> {
    RemotePage::new(
        MockHost::new("/remote/tv"),
        RemoteBindings::default(),
        PageConfig::default(),
    )
}

fn actions(host: &MockHost) -> Vec<String> {
    host.sent_json()
        .iter()
        .map(|v| v["action"].as_str().unwrap_or_default().to_string())
        .collect()
}

// =============================================================================
// Config Page
// =============================================================================

#[test]
fn test_scan_lists_networks_in_order() {
    let mut page = ConfigPage::new(
        MockHost::new("/config"),
        ConfigBindings::default(),
        PageConfig::default(),
    );

    page.scan();
    assert_eq!(
        page.host().html("ssids").as_deref(),
        Some("<option>-- Scanning --</option>")
    );
    assert_eq!(page.host().sent_json()[0]["func"], "scan_wifi");
    assert!(matches!(
        page.request_state(RequestKind::WifiScan),
        RequestState::Pending { .. }
    ));

    page.on_message(r#"{"func":"wifi-ssids","ssids":[{"name":"Home"},{"name":"Office"}]}"#);
    assert_eq!(
        page.host().html("ssids").as_deref(),
        Some("<option>-- Choose WiFi --</option><option>Home</option><option>Office</option>")
    );
    assert_eq!(page.request_state(RequestKind::WifiScan), RequestState::Done);
}

#[test]
fn test_legacy_untagged_ssid_list() {
    let mut page = ConfigPage::new(
        MockHost::new("/config"),
        ConfigBindings::default(),
        PageConfig::default(),
    );
    page.scan();
    page.on_message(r#"{"ssids":[{"name":"<Lab>"}]}"#);
    assert_eq!(
        page.host().html("ssids").as_deref(),
        Some("<option>-- Choose WiFi --</option><option>&lt;Lab&gt;</option>")
    );
}

#[test]
fn test_malformed_frame_leaves_page_untouched() {
    let mut page = ConfigPage::new(
        MockHost::new("/config"),
        ConfigBindings::default(),
        PageConfig::default(),
    );
    page.scan();
    page.on_message("not json at all");

    assert_eq!(
        page.host().html("ssids").as_deref(),
        Some("<option>-- Scanning --</option>")
    );
    assert!(matches!(
        page.request_state(RequestKind::WifiScan),
        RequestState::Pending { .. }
    ));
    assert!(page.host().has_log_containing("decode failed"));
}

// =============================================================================
// IR Learn / IR Test
// =============================================================================

#[test]
fn test_learn_with_empty_label_sends_nothing() {
    let host = MockHost::new("/setup/tv/power");
    host.add_field("lbl", "");
    let mut page = LearnPage::new(host, LearnBindings::default(), PageConfig::default());

    assert_eq!(page.load_ir(0), Err(ValidationError::MissingLabel));
    assert!(page.host().sent().is_empty());
    assert_eq!(
        page.host().html("irget").as_deref(),
        Some("Button must have a label first")
    );
}

#[test]
fn test_test_send_round_trip() {
    let host = MockHost::new("/test");
    host.add_field("typ", "NEC");
    host.add_field("add", "12x");
    host.add_field("val", "");
    let mut page = TestPage::new(host, TestBindings::default(), PageConfig::default());

    assert_eq!(page.send_ir(), Err(ValidationError::NotNumeric));
    assert!(page.host().sent().is_empty());
    assert_eq!(
        page.host().html("ntc").as_deref(),
        Some("Addr and Cmd must be numbers")
    );

    page.host().set_value("val", "34");
    page.send_ir().unwrap();
    let sent = page.host().sent_json();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["func"], "test_send");
    assert_eq!(sent[0]["address"], "12");
    assert_eq!(sent[0]["value"], "34");
    assert_eq!(page.host().html("ntc").as_deref(), Some("Sending ..."));

    page.on_message(r#"{"func":"send_resp"}"#);
    assert_eq!(page.host().html("ntc").as_deref(), Some("Sent"));

    let (key, delay) = page.host().pending_timers()[0];
    assert_eq!(delay, SENT_NOTICE_CLEAR_MS);
    assert!(page.host().fire(key));
    page.on_timer(key);
    assert_eq!(page.host().html("ntc").as_deref(), Some("&nbsp;"));
}

// =============================================================================
// Remote Gestures
// =============================================================================

#[test]
fn test_short_press_is_one_click() {
    for held_for in [0.0, 10.0, 120.0, 249.9] {
        let mut page = remote();
        page.pointer(&PointerInput::command(PointerPhase::Down, 1, "5", 1000.0));
        page.pointer(&PointerInput::command(PointerPhase::Up, 1, "5", 1000.0 + held_for));

        assert_eq!(actions(page.host()), vec!["click"]);
        assert!(page.host().pending_timers().is_empty());
        assert!(page.encoder().is_idle());
    }
}

#[test]
fn test_long_press_is_press_then_release() {
    let mut page = remote();
    page.pointer(&PointerInput::command(PointerPhase::Down, 1, "5", 1000.0));

    let (key, delay) = page.host().pending_timers()[0];
    assert_eq!(delay, HOLD_THRESHOLD_MS);
    page.host().fire(key);
    page.on_timer(key);
    page.pointer(&PointerInput::command(PointerPhase::Up, 1, "5", 2500.0));

    assert_eq!(actions(page.host()), vec!["press", "release"]);
    // Measured from pointer-down, not from the press
    assert_eq!(page.host().sent_json()[1]["duration"], "1500");
}

#[test]
fn test_leave_cancels_once() {
    let mut page = remote();
    page.pointer(&PointerInput::command(PointerPhase::Down, 1, "5", 0.0));
    page.pointer(&PointerInput::command(PointerPhase::Leave, 1, "5", 40.0));
    page.pointer(&PointerInput::command(PointerPhase::Leave, 1, "5", 60.0));

    assert_eq!(actions(page.host()), vec!["cancel"]);
    assert_eq!(page.host().sent_json()[0]["duration"], "40");
    assert!(page.host().pending_timers().is_empty());
}

#[test]
fn test_secondary_button_ignored() {
    let mut page = remote();
    let mut input = PointerInput::command(PointerPhase::Down, 1, "5", 0.0);
    input.buttons = 2;
    page.pointer(&input);
    page.pointer(&PointerInput::command(PointerPhase::Up, 1, "5", 10.0));

    assert!(page.host().sent().is_empty());
    assert!(page.host().pending_timers().is_empty());
}

#[test]
fn test_two_pointers_are_independent() {
    let mut page = remote();
    page.pointer(&PointerInput::command(PointerPhase::Down, 1, "1", 0.0));
    page.pointer(&PointerInput::command(PointerPhase::Down, 2, "2", 10.0));
    page.pointer(&PointerInput::command(PointerPhase::Up, 2, "2", 50.0));

    let sent = page.host().sent_json();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["btnVal"], "2");
    assert_eq!(sent[0]["action"], "click");

    let (key, _) = page.host().pending_timers()[0];
    page.host().fire(key);
    page.on_timer(key);
    let sent = page.host().sent_json();
    assert_eq!(sent[1]["btnVal"], "1");
    assert_eq!(sent[1]["action"], "press");
}

#[test]
fn test_no_repeat_keeps_other_buttons_gesture() {
    let mut page = remote();
    page.pointer(&PointerInput::command(PointerPhase::Down, 1, "1", 0.0));
    let (key, _) = page.host().pending_timers()[0];
    page.host().fire(key);
    page.on_timer(key);

    page.pointer(&PointerInput::command(PointerPhase::Down, 2, "0", 300.0));
    page.on_message(r#"{"func":"btn_resp","button":"1","action":"no-repeat"}"#);
    page.pointer(&PointerInput::command(PointerPhase::Up, 2, "0", 350.0));
    page.pointer(&PointerInput::command(PointerPhase::Up, 1, "1", 900.0));

    let sent = page.host().sent_json();
    assert_eq!(actions(page.host()), vec!["press", "click"]);
    assert_eq!(sent[0]["btnVal"], "1");
    assert_eq!(sent[1]["btnVal"], "0");
    assert!(page.host().pending_timers().is_empty());
}

#[test]
fn test_other_targets_ignored() {
    let mut page = remote();
    let mut input = PointerInput::command(PointerPhase::Down, 1, "5", 0.0);
    input.target_name = "menu".to_string();
    page.pointer(&input);
    assert!(page.host().pending_timers().is_empty());
}

// =============================================================================
// LED and Redirects
// =============================================================================

#[test]
fn test_reflect_table() {
    for action in [None, Some(LedAction::Press), Some(LedAction::ClickInFlight), Some(LedAction::Busy)] {
        assert_eq!(reflect(false, action), LedState::Disconnected);
    }
    assert_eq!(reflect(true, None), LedState::Off);
    assert_eq!(reflect(true, Some(LedAction::ClickInFlight)), LedState::On);
    assert_eq!(reflect(true, Some(LedAction::Busy)), LedState::Busy);
}

#[test]
fn test_led_follows_click_and_reply() {
    let mut page = remote();
    page.pointer(&PointerInput::command(PointerPhase::Down, 1, "5", 0.0));
    page.pointer(&PointerInput::command(PointerPhase::Up, 1, "5", 80.0));
    assert_eq!(page.host().html("led"), Some(LedState::On.markup()));

    page.on_message(r#"{"func":"btn_resp","action":"click"}"#);
    assert_eq!(page.host().html("led"), Some(LedState::Off.markup()));
}

#[test]
fn test_redirect_fires_once_per_response() {
    let mut page = remote();
    page.on_message(r#"{"func":"btn_resp","action":"click","redirect":"/remote/radio"}"#);
    page.on_message(r#"{"func":"btn_resp","action":"click"}"#);
    assert_eq!(
        page.host().navigations(),
        vec!["http://remote.local/remote/radio".to_string()]
    );
}

// =============================================================================
// Timeouts
// =============================================================================

#[test]
fn test_no_timeout_by_default() {
    let host = MockHost::new("/test");
    let mut page = TestPage::new(host, TestBindings::default(), PageConfig::default());
    page.load_ir();
    assert!(page.host().pending_timers().is_empty());
    assert!(matches!(
        page.request_state(RequestKind::IrLearn),
        RequestState::Pending { timeout: None }
    ));
}

#[test]
fn test_timeout_then_late_answer() {
    let host = MockHost::new("/test");
    let mut page = TestPage::new(
        host,
        TestBindings::default(),
        PageConfig::with_request_timeout(2000),
    );
    page.load_ir();
    let key = page.host().fire_next().unwrap();
    page.on_timer(key);
    assert_eq!(page.host().html("ntc").as_deref(), Some("Timed out"));
    assert_eq!(page.request_state(RequestKind::IrLearn), RequestState::TimedOut);

    page.on_message(r#"{"func":"ir_resp","ir_resp":"0","type":"NEC","address":"1","value":"2","delay":"0"}"#);
    assert_eq!(page.host().value("typ").as_deref(), Some("NEC"));
    assert_eq!(page.request_state(RequestKind::IrLearn), RequestState::Done);
}

#[test]
fn test_answer_cancels_timeout() {
    let host = MockHost::new("/config");
    let mut page = ConfigPage::new(
        host,
        ConfigBindings::default(),
        PageConfig::with_request_timeout(2000),
    );
    page.on_connection(true);
    assert_eq!(page.host().pending_timers().len(), 1);
    page.on_message(r#"{"func":"wifi_resp","host":"h","ssid":"s","ip":"1.2.3.4","timezone":"UTC"}"#);
    assert!(page.host().pending_timers().is_empty());
    assert_eq!(page.host().cancelled_timers().len(), 1);
}

// =============================================================================
// Codec
// =============================================================================

#[test]
fn test_codec_rejects_garbage_without_panicking() {
    let codec = Codec::default();
    for text in ["", "{", "[1,2]", "42", "\"btn_resp\""] {
        assert!(codec.decode(text).is_err(), "{:?} should not decode", text);
    }
    assert!(matches!(codec.decode("{"), Err(DecodeError::Malformed(_))));
    assert_eq!(codec.decode(r#"{"func":"later"}"#), Ok(Response::Unknown));
}
