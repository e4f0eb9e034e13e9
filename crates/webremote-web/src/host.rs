//! `Host` implementation over `web-sys`
//!
//! Element lookups go through `document.getElementById` on every call; the
//! pages are small and their markup is rewritten by the controllers, so no
//! element handles are cached. Timers are `window.setTimeout` callbacks that
//! report back through a sink installed by the owning panel.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, Window,
};
use webremote_core::{Host, TimerKey};

use crate::transport;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Receives fired timers
pub(crate) type TimerSink = Rc<dyn Fn(TimerKey)>;

struct Inner {
    window: Window,
    document: Document,
    /// Browser handles of pending timers
    timers: RefCell<HashMap<TimerKey, i32>>,
    sink: RefCell<Option<TimerSink>>,
}

/// Browser host. Cheap to clone; clones share timers and the sink.
#[derive(Clone)]
pub struct WebHost {
    inner: Rc<Inner>,
}

impl WebHost {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self {
            inner: Rc::new(Inner {
                window,
                document,
                timers: RefCell::new(HashMap::new()),
                sink: RefCell::new(None),
            }),
        })
    }

    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    /// Route fired timers to `sink`
    pub(crate) fn set_timer_sink(&self, sink: TimerSink) {
        *self.inner.sink.borrow_mut() = Some(sink);
    }

    /// Number of timers scheduled and not yet fired or cancelled
    pub fn pending_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.inner.document.get_element_by_id(id)
    }

    /// Input named `name` inside row `row` of table `table_id`
    fn row_element(&self, table_id: &str, row: usize, name: &str) -> Option<HtmlInputElement> {
        let table = self.element(table_id)?;
        let row = table
            .get_elements_by_tag_name("tr")
            .item(u32::try_from(row).ok()?)?;
        row.query_selector(&format!("input[name='{}']", name))
            .ok()
            .flatten()?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }
}

impl Host for WebHost {
    fn send(&self, text: &str) {
        transport::send_to_ws(text);
    }

    fn is_open(&self) -> bool {
        transport::is_ws_open()
    }

    fn path(&self) -> String {
        self.inner.window.location().pathname().unwrap_or_default()
    }

    fn origin(&self) -> String {
        self.inner.window.location().origin().unwrap_or_default()
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = self.inner.window.location().set_href(url) {
            log(&format!("[web-host] navigate to {} failed: {:?}", url, e));
        }
    }

    fn open_window(&self, url: &str, target: &str) {
        if let Err(e) = self.inner.window.open_with_url_and_target(url, target) {
            log(&format!("[web-host] open {} failed: {:?}", url, e));
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.inner.window.confirm_with_message(message).unwrap_or(false)
    }

    fn set_html(&self, id: &str, html: &str) {
        match self.element(id) {
            Some(el) => el.set_inner_html(html),
            None => log(&format!("[web-host] no element #{}", id)),
        }
    }

    fn value(&self, id: &str) -> Option<String> {
        let el = self.element(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        el.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
    }

    fn set_value(&self, id: &str, value: &str) {
        let Some(el) = self.element(id) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.element(id)?.get_attribute(name)
    }

    fn form_fields(&self) -> Vec<(String, String)> {
        let Ok(nodes) = self.inner.document.query_selector_all("input") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .map(|input| (input.name(), input.value()))
            .collect()
    }

    fn selected_index(&self, id: &str) -> Option<usize> {
        let index = self.element(id)?.dyn_into::<HtmlSelectElement>().ok()?.selected_index();
        usize::try_from(index).ok()
    }

    fn option_value(&self, id: &str, index: usize) -> Option<String> {
        let select = self.element(id)?.dyn_into::<HtmlSelectElement>().ok()?;
        let option = select.item(u32::try_from(index).ok()?)?;
        option
            .dyn_into::<web_sys::HtmlOptionElement>()
            .ok()
            .map(|o| o.value())
    }

    fn row_input(&self, table_id: &str, row: usize, name: &str) -> Option<String> {
        self.row_element(table_id, row, name).map(|input| input.value())
    }

    fn set_row_input(&self, table_id: &str, row: usize, name: &str, value: &str) {
        if let Some(input) = self.row_element(table_id, row, name) {
            input.set_value(value);
        }
    }

    fn submit_form(&self, id: &str) {
        let Some(form) = self
            .element(id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            log(&format!("[web-host] no form #{}", id));
            return;
        };
        if let Err(e) = form.submit() {
            log(&format!("[web-host] submit #{} failed: {:?}", id, e));
        }
    }

    fn schedule(&self, key: TimerKey, delay_ms: u32) {
        let weak = Rc::downgrade(&self.inner);
        let callback = Closure::once_into_js(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.timers.borrow_mut().remove(&key);
            // Clone the sink out so the page may schedule from inside it
            let sink = inner.sink.borrow().clone();
            if let Some(sink) = sink {
                sink(key);
            }
        });

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .inner
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => {
                self.inner.timers.borrow_mut().insert(key, handle);
            }
            Err(e) => log(&format!("[web-host] setTimeout failed: {:?}", e)),
        }
    }

    fn cancel(&self, key: TimerKey) {
        if let Some(handle) = self.inner.timers.borrow_mut().remove(&key) {
            self.inner.window.clear_timeout_with_handle(handle);
        }
    }

    fn log(&self, msg: &str) {
        log(msg);
    }
}
