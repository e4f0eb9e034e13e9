//! Listener bookkeeping and DOM event decoding

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Event, EventTarget, HtmlButtonElement, PointerEvent};
use webremote_core::{PointerInput, PointerPhase};

/// An event listener that stays registered for as long as it is alive.
///
/// The closure must outlive its registration, so the panel keeps every
/// `Listener` it creates; dropping one removes it from the target.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn detail(event: &Event) -> Option<JsValue> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    if detail.is_undefined() || detail.is_null() {
        None
    } else {
        Some(detail)
    }
}

fn get(obj: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined())
}

/// Connection state carried by a `ws_state` event.
///
/// The helper script nests it as `detail.obj.open`; a flat `detail.open` is
/// accepted as well. A missing flag reads as closed.
pub(crate) fn ws_state(event: &Event) -> bool {
    let Some(detail) = detail(event) else {
        return false;
    };
    get(&detail, "obj")
        .and_then(|obj| get(&obj, "open"))
        .or_else(|| get(&detail, "open"))
        .map(|open| open.is_truthy())
        .unwrap_or(false)
}

/// Raw text carried by a `ws_message` event
pub(crate) fn ws_message(event: &Event) -> Option<String> {
    get(&detail(event)?, "message")?.as_string()
}

/// Map a pointer event on a button to encoder input
pub(crate) fn pointer_input(event: &Event) -> Option<PointerInput> {
    let event = event.dyn_ref::<PointerEvent>()?;
    let phase = match event.type_().as_str() {
        "pointerdown" => PointerPhase::Down,
        "pointerup" => PointerPhase::Up,
        "pointerleave" => PointerPhase::Leave,
        _ => return None,
    };
    let button = event
        .current_target()
        .or_else(|| event.target())?
        .dyn_into::<HtmlButtonElement>()
        .ok()?;

    Some(PointerInput {
        phase,
        pointer_id: event.pointer_id(),
        buttons: event.buttons(),
        timestamp: event.time_stamp(),
        target_name: button.name(),
        target_value: button.value(),
    })
}
