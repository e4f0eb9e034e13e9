//! Recording host for tests
//!
//! [`MockHost`] implements [`Host`] without a browser. It keeps a tiny
//! model of the document (element markup, input values, selects, table
//! rows), records every frame sent, every navigation and every timer, and
//! lets tests fire timers explicitly.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use crate::host::{Host, TimerKey};

/// Mock host for unit and integration testing
pub struct MockHost {
    open: Cell<bool>,
    path: String,
    origin: String,
    confirm_answer: Cell<bool>,
    sent: RefCell<Vec<String>>,
    html: RefCell<HashMap<String, String>>,
    values: RefCell<HashMap<String, String>>,
    attributes: RefCell<HashMap<(String, String), String>>,
    fields: RefCell<Vec<(String, String)>>,
    selects: RefCell<HashMap<String, (Option<usize>, Vec<String>)>>,
    rows: RefCell<HashMap<(String, usize, String), String>>,
    submitted: RefCell<Vec<String>>,
    navigations: RefCell<Vec<String>>,
    windows: RefCell<Vec<(String, String)>>,
    prompts: RefCell<Vec<String>>,
    timers: RefCell<BTreeMap<TimerKey, u32>>,
    cancelled: RefCell<Vec<TimerKey>>,
    debug_log: RefCell<Vec<String>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MockHost {
    /// Create a mock host for a document at `path`, connection open
    pub fn new(path: &str) -> Self {
        Self {
            open: Cell::new(true),
            path: path.to_string(),
            origin: "http://remote.local".to_string(),
            confirm_answer: Cell::new(false),
            sent: RefCell::new(Vec::new()),
            html: RefCell::new(HashMap::new()),
            values: RefCell::new(HashMap::new()),
            attributes: RefCell::new(HashMap::new()),
            fields: RefCell::new(Vec::new()),
            selects: RefCell::new(HashMap::new()),
            rows: RefCell::new(HashMap::new()),
            submitted: RefCell::new(Vec::new()),
            navigations: RefCell::new(Vec::new()),
            windows: RefCell::new(Vec::new()),
            prompts: RefCell::new(Vec::new()),
            timers: RefCell::new(BTreeMap::new()),
            cancelled: RefCell::new(Vec::new()),
            debug_log: RefCell::new(Vec::new()),
        }
    }

    // === Setup ===

    pub fn set_open(&self, open: bool) {
        self.open.set(open);
    }

    pub fn set_confirm_answer(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    /// Add an input that shows up in `form_fields` and `value`
    pub fn add_field(&self, id: &str, value: &str) {
        self.fields.borrow_mut().push((id.to_string(), value.to_string()));
        self.values.borrow_mut().insert(id.to_string(), value.to_string());
    }

    pub fn set_attribute(&self, id: &str, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert((id.to_string(), name.to_string()), value.to_string());
    }

    /// Define a select with the given option values and selection
    pub fn set_select(&self, id: &str, options: &[&str], selected: Option<usize>) {
        let options = options.iter().map(|s| s.to_string()).collect();
        self.selects.borrow_mut().insert(id.to_string(), (selected, options));
    }

    // === Inspection ===

    /// All frames sent so far
    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }

    /// All frames sent so far, parsed as JSON
    pub fn sent_json(&self) -> Vec<serde_json::Value> {
        self.sent
            .borrow()
            .iter()
            .filter_map(|s| serde_json::from_str(s).ok())
            .collect()
    }

    /// Drain the sent frames
    pub fn take_sent(&self) -> Vec<String> {
        std::mem::take(&mut *self.sent.borrow_mut())
    }

    /// Markup last written to element `id`
    pub fn html(&self, id: &str) -> Option<String> {
        self.html.borrow().get(id).cloned()
    }

    pub fn row_value(&self, table_id: &str, row: usize, name: &str) -> Option<String> {
        self.rows
            .borrow()
            .get(&(table_id.to_string(), row, name.to_string()))
            .cloned()
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub fn windows(&self) -> Vec<(String, String)> {
        self.windows.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    /// Timers scheduled and neither fired nor cancelled, with their delays
    pub fn pending_timers(&self) -> Vec<(TimerKey, u32)> {
        self.timers.borrow().iter().map(|(k, d)| (*k, *d)).collect()
    }

    pub fn cancelled_timers(&self) -> Vec<TimerKey> {
        self.cancelled.borrow().clone()
    }

    /// Remove a pending timer so the test can deliver it to the page.
    ///
    /// Returns `false` if the timer is unknown or was cancelled.
    pub fn fire(&self, key: TimerKey) -> bool {
        self.timers.borrow_mut().remove(&key).is_some()
    }

    /// Remove the earliest scheduled pending timer
    pub fn fire_next(&self) -> Option<TimerKey> {
        let key = self.timers.borrow().keys().next().copied()?;
        self.timers.borrow_mut().remove(&key);
        Some(key)
    }

    pub fn get_debug_log(&self) -> Vec<String> {
        self.debug_log.borrow().clone()
    }

    pub fn has_log_containing(&self, substr: &str) -> bool {
        self.debug_log.borrow().iter().any(|msg| msg.contains(substr))
    }
}

impl Host for MockHost {
    fn send(&self, text: &str) {
        self.sent.borrow_mut().push(text.to_string());
    }

    fn is_open(&self) -> bool {
        self.open.get()
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_string());
    }

    fn open_window(&self, url: &str, target: &str) {
        self.windows
            .borrow_mut()
            .push((url.to_string(), target.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }

    fn set_html(&self, id: &str, html: &str) {
        self.html.borrow_mut().insert(id.to_string(), html.to_string());
    }

    fn value(&self, id: &str) -> Option<String> {
        if let Some(v) = self.values.borrow().get(id) {
            return Some(v.clone());
        }
        let selects = self.selects.borrow();
        let (selected, options) = selects.get(id)?;
        selected.and_then(|i| options.get(i).cloned())
    }

    fn set_value(&self, id: &str, value: &str) {
        self.values.borrow_mut().insert(id.to_string(), value.to_string());
        for field in self.fields.borrow_mut().iter_mut() {
            if field.0 == id {
                field.1 = value.to_string();
            }
        }
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.attributes
            .borrow()
            .get(&(id.to_string(), name.to_string()))
            .cloned()
    }

    fn form_fields(&self) -> Vec<(String, String)> {
        self.fields.borrow().clone()
    }

    fn selected_index(&self, id: &str) -> Option<usize> {
        self.selects.borrow().get(id).and_then(|(selected, _)| *selected)
    }

    fn option_value(&self, id: &str, index: usize) -> Option<String> {
        self.selects
            .borrow()
            .get(id)
            .and_then(|(_, options)| options.get(index).cloned())
    }

    fn row_input(&self, table_id: &str, row: usize, name: &str) -> Option<String> {
        self.row_value(table_id, row, name)
    }

    fn set_row_input(&self, table_id: &str, row: usize, name: &str, value: &str) {
        self.rows
            .borrow_mut()
            .insert((table_id.to_string(), row, name.to_string()), value.to_string());
    }

    fn submit_form(&self, id: &str) {
        self.submitted.borrow_mut().push(id.to_string());
    }

    fn schedule(&self, key: TimerKey, delay_ms: u32) {
        self.timers.borrow_mut().insert(key, delay_ms);
    }

    fn cancel(&self, key: TimerKey) {
        if self.timers.borrow_mut().remove(&key).is_some() {
            self.cancelled.borrow_mut().push(key);
        }
    }

    fn log(&self, msg: &str) {
        self.debug_log.borrow_mut().push(msg.to_string());
    }
}
