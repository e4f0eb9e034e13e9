//! Bindings to the page's WebSocket helper script

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Open (or reopen) the shared WebSocket
    #[wasm_bindgen(js_name = "openWS")]
    pub fn open_ws();

    /// Send one text frame
    #[wasm_bindgen(js_name = "sendToWS")]
    pub fn send_to_ws(text: &str);

    /// Whether the shared WebSocket is open
    #[wasm_bindgen(js_name = "isWSOpen")]
    pub fn is_ws_open() -> bool;
}

/// Name of the connection state event dispatched on `document`
pub const STATE_EVENT: &str = "ws_state";

/// Name of the inbound message event dispatched on `document`
pub const MESSAGE_EVENT: &str = "ws_message";
