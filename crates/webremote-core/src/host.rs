//! Host abstraction for page controllers
//!
//! The [`Host`] trait is the only way the controllers reach the outside
//! world: the WebSocket transport, the document, the location bar and
//! one-shot timers. The browser crate implements it with `web-sys`; tests
//! use [`crate::MockHost`].
//!
//! # Platform Implementations
//!
//! - **Browser**: `openWS`/`sendToWS`/`isWSOpen` globals for transport,
//!   `window.setTimeout` for timers, `console.log` for debug output
//! - **Mock**: records everything and lets tests fire timers by hand

/// Identifier of a one-shot timer scheduled through [`Host::schedule`].
///
/// Keys are allocated by the controllers, never reused within a page, and
/// handed back through [`crate::Page::on_timer`] when the timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerKey(pub u64);

/// Everything a page controller needs from its environment.
///
/// All methods take `&self`; implementations use interior mutability where
/// they keep state. Lookups of elements that do not exist return `None` or
/// do nothing; a missing element is never an error for the caller.
pub trait Host {
    // === Transport ===

    /// Send one text frame over the shared WebSocket
    fn send(&self, text: &str);

    /// Whether the shared WebSocket is currently open
    fn is_open(&self) -> bool;

    // === Location ===

    /// Path of the current document, e.g. `/remote/tv`
    fn path(&self) -> String;

    /// Origin of the current document, e.g. `http://remote.local`
    fn origin(&self) -> String;

    /// Navigate the current document
    fn navigate(&self, url: &str);

    /// Open `url` in the window named `target`
    fn open_window(&self, url: &str, target: &str);

    /// Ask the user a yes/no question
    fn confirm(&self, message: &str) -> bool;

    // === Document ===

    /// Replace the markup of the element with `id`
    fn set_html(&self, id: &str, html: &str);

    /// Current value of the input or select with `id`
    fn value(&self, id: &str) -> Option<String>;

    /// Set the value of the input or select with `id`
    fn set_value(&self, id: &str, value: &str);

    /// Attribute `name` of the element with `id`
    fn attribute(&self, id: &str, name: &str) -> Option<String>;

    /// `(name, value)` of every input on the page, in document order
    fn form_fields(&self) -> Vec<(String, String)>;

    /// Selected option index of the select with `id`
    fn selected_index(&self, id: &str) -> Option<usize>;

    /// Value of option `index` of the select with `id`
    fn option_value(&self, id: &str, index: usize) -> Option<String>;

    /// Value of the input named `name` in table row `row` of table `table_id`
    fn row_input(&self, table_id: &str, row: usize, name: &str) -> Option<String>;

    /// Set the input named `name` in table row `row` of table `table_id`
    fn set_row_input(&self, table_id: &str, row: usize, name: &str, value: &str);

    /// Submit the form with `id`
    fn submit_form(&self, id: &str);

    // === Timers ===

    /// Schedule a one-shot timer; the page's `on_timer(key)` runs when it fires
    fn schedule(&self, key: TimerKey, delay_ms: u32);

    /// Cancel a timer. Unknown, fired or already cancelled keys are ignored.
    fn cancel(&self, key: TimerKey);

    // === Debug ===

    /// Write a diagnostic line
    fn log(&self, msg: &str);
}
