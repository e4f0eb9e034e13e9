//! Page entry points
//!
//! Every device page constructs exactly one panel from its script, e.g.
//! `const panel = new RemotePanel();`. The panel wires the transport events,
//! timers and page elements to its controller and keeps the listeners alive
//! until it is dropped. Methods mirror the handlers the page markup calls
//! (`onclick="panel.load_ir(2)"` and so on).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::EventTarget;
use webremote_core::{
    ConfigBindings, ConfigPage, LearnBindings, LearnPage, Page, PageConfig, RemoteBindings,
    RemotePage, SetupBindings, SetupPage, TestBindings, TestPage, TimerKey,
};

use crate::events::{self, Listener};
use crate::host::WebHost;
use crate::transport::{self, MESSAGE_EVENT, STATE_EVENT};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn page_config(request_timeout_ms: Option<u32>) -> PageConfig {
    match request_timeout_ms {
        Some(ms) => PageConfig::with_request_timeout(ms),
        None => PageConfig::default(),
    }
}

/// Run `f` on the page unless it is already borrowed further up the stack
fn dispatch<P, R>(page: &RefCell<P>, f: impl FnOnce(&mut P) -> R) -> Option<R> {
    match page.try_borrow_mut() {
        Ok(mut page) => Some(f(&mut page)),
        Err(_) => {
            log("[panel] page busy, event dropped");
            None
        }
    }
}

fn dispatch_weak<P, R>(page: &Weak<RefCell<P>>, f: impl FnOnce(&mut P) -> R) -> Option<R> {
    let page = page.upgrade()?;
    dispatch(&page, f)
}

/// Route transport events and fired timers to `page`
fn connect<P: Page + 'static>(
    host: &WebHost,
    page: &Rc<RefCell<P>>,
) -> Result<Vec<Listener>, JsValue> {
    let weak = Rc::downgrade(page);
    host.set_timer_sink(Rc::new(move |key: TimerKey| {
        dispatch_weak(&weak, |p| p.on_timer(key));
    }));

    let document: &EventTarget = host.document().as_ref();

    let weak = Rc::downgrade(page);
    let state = Listener::new(document, STATE_EVENT, move |event| {
        let open = events::ws_state(&event);
        dispatch_weak(&weak, |p| p.on_connection(open));
    })?;

    let weak = Rc::downgrade(page);
    let message = Listener::new(document, MESSAGE_EVENT, move |event| {
        match events::ws_message(&event) {
            Some(text) => {
                dispatch_weak(&weak, |p| p.on_message(&text));
            }
            None => log("[panel] ws_message without message text"),
        }
    })?;

    Ok(vec![state, message])
}

/// Call `action` whenever element `id` fires `event`
fn element_listener<P: 'static>(
    host: &WebHost,
    id: &str,
    event: &'static str,
    page: &Rc<RefCell<P>>,
    action: fn(&mut P),
) -> Result<Option<Listener>, JsValue> {
    let Some(element) = host.document().get_element_by_id(id) else {
        log(&format!("[panel] no element #{} for {}", id, event));
        return Ok(None);
    };
    let weak = Rc::downgrade(page);
    Listener::new(element.as_ref(), event, move |_| {
        dispatch_weak(&weak, action);
    })
    .map(Some)
}

// =============================================================================
// Config
// =============================================================================

/// WiFi configuration page
#[wasm_bindgen]
pub struct ConfigPanel {
    page: Rc<RefCell<ConfigPage<WebHost>>>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ConfigPanel {
    #[wasm_bindgen(constructor)]
    pub fn new(request_timeout_ms: Option<u32>) -> Result<ConfigPanel, JsValue> {
        init_panic_hook();

        let host = WebHost::new()?;
        let bindings = ConfigBindings::default();
        let page = Rc::new(RefCell::new(ConfigPage::new(
            host.clone(),
            bindings.clone(),
            page_config(request_timeout_ms),
        )));

        let mut listeners = connect(&host, &page)?;
        listeners.extend(element_listener(&host, &bindings.scan_button, "click", &page, |p| {
            p.scan()
        })?);
        listeners.extend(element_listener(&host, &bindings.update_button, "click", &page, |p| {
            p.update()
        })?);
        listeners.extend(element_listener(&host, &bindings.networks, "change", &page, |p| {
            p.select_network()
        })?);

        transport::open_ws();
        Ok(Self {
            page,
            _listeners: listeners,
        })
    }

    pub fn scan(&self) {
        dispatch(&self.page, |p| p.scan());
    }

    pub fn update(&self) {
        dispatch(&self.page, |p| p.update());
    }

    pub fn select_network(&self) {
        dispatch(&self.page, |p| p.select_network());
    }
}

// =============================================================================
// IR learn
// =============================================================================

/// Button/menu setup page with per-row IR learning
#[wasm_bindgen]
pub struct LearnPanel {
    page: Rc<RefCell<LearnPage<WebHost>>>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl LearnPanel {
    #[wasm_bindgen(constructor)]
    pub fn new(request_timeout_ms: Option<u32>) -> Result<LearnPanel, JsValue> {
        init_panic_hook();

        let host = WebHost::new()?;
        let page = Rc::new(RefCell::new(LearnPage::new(
            host.clone(),
            LearnBindings::default(),
            page_config(request_timeout_ms),
        )));
        let listeners = connect(&host, &page)?;

        transport::open_ws();
        Ok(Self {
            page,
            _listeners: listeners,
        })
    }

    /// Learn a code for action row `row`; `false` if the input was rejected
    pub fn load_ir(&self, row: u32) -> bool {
        dispatch(&self.page, |p| p.load_ir(row as usize).is_ok()).unwrap_or(false)
    }
}

// =============================================================================
// IR test
// =============================================================================

/// IR test page
#[wasm_bindgen]
pub struct TestPanel {
    page: Rc<RefCell<TestPage<WebHost>>>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl TestPanel {
    #[wasm_bindgen(constructor)]
    pub fn new(request_timeout_ms: Option<u32>) -> Result<TestPanel, JsValue> {
        init_panic_hook();

        let host = WebHost::new()?;
        let page = Rc::new(RefCell::new(TestPage::new(
            host.clone(),
            TestBindings::default(),
            page_config(request_timeout_ms),
        )));
        let listeners = connect(&host, &page)?;

        transport::open_ws();
        Ok(Self {
            page,
            _listeners: listeners,
        })
    }

    pub fn load_ir(&self) {
        dispatch(&self.page, |p| p.load_ir());
    }

    /// Send the code in the form; `false` if address or value is not a number
    pub fn send_ir(&self) -> bool {
        dispatch(&self.page, |p| p.send_ir().is_ok()).unwrap_or(false)
    }
}

// =============================================================================
// Remote
// =============================================================================

/// Remote control page
#[wasm_bindgen]
pub struct RemotePanel {
    _page: Rc<RefCell<RemotePage<WebHost>>>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl RemotePanel {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<RemotePanel, JsValue> {
        init_panic_hook();

        let host = WebHost::new()?;
        let bindings = RemoteBindings::default();
        let page = Rc::new(RefCell::new(RemotePage::new(
            host.clone(),
            bindings.clone(),
            PageConfig::default(),
        )));
        let mut listeners = connect(&host, &page)?;

        let buttons = host.document().query_selector_all(&bindings.buttons)?;
        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i) else {
                continue;
            };
            for event in ["pointerdown", "pointerup", "pointerleave"] {
                let weak = Rc::downgrade(&page);
                listeners.push(Listener::new(button.as_ref(), event, move |e| {
                    if let Some(input) = events::pointer_input(&e) {
                        dispatch_weak(&weak, |p| p.pointer(&input));
                    }
                })?);
            }
        }
        log(&format!("[panel] remote wired {} buttons", buttons.length()));

        transport::open_ws();
        Ok(Self {
            _page: page,
            _listeners: listeners,
        })
    }
}

// =============================================================================
// Setup
// =============================================================================

/// Remote/menu setup page navigation
#[wasm_bindgen]
pub struct SetupPanel {
    page: SetupPage<WebHost>,
}

#[wasm_bindgen]
impl SetupPanel {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SetupPanel, JsValue> {
        init_panic_hook();
        Ok(Self {
            page: SetupPage::new(WebHost::new()?, SetupBindings::default()),
        })
    }

    pub fn btn_action(&self, key: &str) {
        self.page.btn_action(key);
    }

    pub fn btn_done(&self) -> bool {
        self.page.btn_done()
    }
}
