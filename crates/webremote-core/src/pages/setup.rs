//! Remote/menu setup page navigation

use crate::bindings::SetupBindings;
use crate::constants::{SAVED_MARKER, UNSAVED_PROMPT};
use crate::host::Host;

/// Navigation helpers of the setup page. No device traffic is involved.
pub struct SetupPage<H: Host> {
    host: H,
    bindings: SetupBindings,
}

impl<H: Host> SetupPage<H> {
    pub fn new(host: H, bindings: SetupBindings) -> Self {
        Self { host, bindings }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Current path with any `.html` removed
    fn base(&self) -> String {
        self.host.path().replace(".html", "")
    }

    /// Open the setup page of entry `key`
    pub fn btn_action(&self, key: &str) {
        let url = format!("{}/{}", self.base(), key);
        self.host.log(&format!("[setup] open {}", url));
        self.host.navigate(&url);
    }

    /// Done button. Leaves the page if it is saved or the user agrees to
    /// drop the changes; returns whether it navigated.
    pub fn btn_done(&self) -> bool {
        let saved = self.host.attribute(&self.bindings.done, "class").as_deref() == Some(SAVED_MARKER);
        if !saved && !self.host.confirm(UNSAVED_PROMPT) {
            return false;
        }
        self.host.navigate(&format!("{}?done=true", self.base()));
        true
    }
}
