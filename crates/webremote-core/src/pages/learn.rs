//! IR learning on the button setup page

use super::link::{Link, TimerPurpose};
use super::Page;
use crate::bindings::{LearnBindings, PageConfig};
use crate::codec::{Command, Response};
use crate::constants::{BLANK_NOTICE, NOTICE_CLICK_REMOTE, NOTICE_TIMED_OUT, NOTICE_UNKNOWN_CODE};
use crate::correlator::{Outcome, RequestKind, RequestState};
use crate::error::ValidationError;
use crate::host::{Host, TimerKey};
use crate::text::parse_int;

/// Controller for the button/menu setup page.
///
/// Each action row has a "learn" button; the captured code is written into
/// that row and the action form is submitted.
pub struct LearnPage<H: Host> {
    link: Link<H>,
    bindings: LearnBindings,
}

impl<H: Host> LearnPage<H> {
    pub fn new(host: H, bindings: LearnBindings, config: PageConfig) -> Self {
        Self {
            link: Link::new(host, config, "learn"),
            bindings,
        }
    }

    pub fn host(&self) -> &H {
        self.link.host()
    }

    pub fn request_state(&self) -> RequestState {
        self.link.request_state(RequestKind::IrLearn)
    }

    /// Learn button of action row `row`.
    ///
    /// A button needs a label and a menu needs a name before codes can be
    /// learned; the error is also shown in the notice element.
    pub fn load_ir(&mut self, row: usize) -> Result<(), ValidationError> {
        let host = self.link.host();
        let label = host.value(&self.bindings.label);
        let name = host.value(&self.bindings.name);

        let invalid = if label.as_deref() == Some("") {
            Some(ValidationError::MissingLabel)
        } else if name.as_deref() == Some("") {
            Some(ValidationError::MissingName)
        } else {
            None
        };
        if let Some(err) = invalid {
            host.set_html(&self.bindings.notice, &err.to_string());
            return Err(err);
        }
        if label.is_none() && name.is_none() {
            self.link.log("no label or name input, not learning");
            return Ok(());
        }

        host.set_html(&self.bindings.notice, NOTICE_CLICK_REMOTE);
        let cmd = Command::IrGet {
            row: row.to_string(),
            path: self.link.path(),
        };
        self.link.request(RequestKind::IrLearn, &cmd);
        Ok(())
    }

    fn apply(&mut self, response: Response) {
        let Some(resolution) = self.link.resolve(&response) else {
            return;
        };
        let Response::IrResp {
            row,
            kind,
            address,
            value,
            delay,
        } = response
        else {
            return;
        };

        let host = self.link.host();
        let row = parse_int(&row).and_then(|r| usize::try_from(r).ok());
        let row = match (resolution.outcome, row) {
            (Outcome::Completed, Some(row)) => row,
            _ => {
                host.set_html(&self.bindings.notice, NOTICE_UNKNOWN_CODE);
                return;
            }
        };

        let b = &self.bindings;
        host.set_html(&b.notice, BLANK_NOTICE);
        host.set_row_input(&b.steps, row, &b.type_input, &kind);
        host.set_row_input(&b.steps, row, &b.address_input, &address);
        host.set_row_input(&b.steps, row, &b.value_input, &value);
        if host.row_input(&b.steps, row, &b.delay_input).as_deref() == Some("") {
            host.set_row_input(&b.steps, row, &b.delay_input, &delay);
        }
        host.submit_form(&b.form);
    }
}

impl<H: Host> Page for LearnPage<H> {
    fn on_connection(&mut self, _open: bool) {}

    fn on_message(&mut self, text: &str) {
        if let Some(response) = self.link.decode(text) {
            self.apply(response);
        }
    }

    fn on_timer(&mut self, key: TimerKey) {
        if let Some(TimerPurpose::RequestTimeout(kind)) = self.link.fire(key) {
            if self.link.expire(kind) {
                self.link.host().set_html(&self.bindings.notice, NOTICE_TIMED_OUT);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHost;

    fn page(host: MockHost) -> LearnPage<MockHost> {
        LearnPage::new(host, LearnBindings::default(), PageConfig::default())
    }

    #[test]
    fn test_missing_label() {
        let host = MockHost::new("/setup/tv/power");
        host.add_field("lbl", "");
        let mut page = page(host);

        assert_eq!(page.load_ir(1), Err(ValidationError::MissingLabel));
        assert_eq!(page.host().html("irget").as_deref(), Some("Button must have a label first"));
        assert!(page.host().sent().is_empty());
    }

    #[test]
    fn test_missing_menu_name() {
        let host = MockHost::new("/setup/tv");
        host.add_field("name", "");
        let mut page = page(host);

        assert_eq!(page.load_ir(0), Err(ValidationError::MissingName));
        assert_eq!(page.host().html("irget").as_deref(), Some("Menu must have a name first"));
    }

    #[test]
    fn test_learn_fills_row_and_submits() {
        let host = MockHost::new("/setup/tv/power");
        host.add_field("lbl", "Power");
        host.set_row_input("steps", 2, "dly", "");
        let mut page = page(host);

        page.load_ir(2).unwrap();
        assert_eq!(page.host().html("irget").as_deref(), Some("Click button on remote"));
        let sent = page.host().sent_json();
        assert_eq!(sent[0]["func"], "ir_get");
        assert_eq!(sent[0]["ir_get"], "2");
        assert_eq!(sent[0]["path"], "/setup/tv/power");

        page.on_message(
            r#"{"func":"ir_resp","ir_resp":"2","type":"NEC","address":"4","value":"8","delay":"100"}"#,
        );
        assert_eq!(page.host().html("irget").as_deref(), Some("&nbsp;"));
        assert_eq!(page.host().row_value("steps", 2, "typ").as_deref(), Some("NEC"));
        assert_eq!(page.host().row_value("steps", 2, "add").as_deref(), Some("4"));
        assert_eq!(page.host().row_value("steps", 2, "val").as_deref(), Some("8"));
        assert_eq!(page.host().row_value("steps", 2, "dly").as_deref(), Some("100"));
        assert_eq!(page.host().submitted(), vec!["actForm".to_string()]);
        assert_eq!(page.request_state(), RequestState::Done);
    }

    #[test]
    fn test_existing_delay_kept() {
        let host = MockHost::new("/setup/tv/power");
        host.add_field("lbl", "Power");
        host.set_row_input("steps", 0, "dly", "500");
        let mut page = page(host);

        page.load_ir(0).unwrap();
        page.on_message(r#"{"func":"ir_resp","ir_resp":0,"type":"SONY","address":1,"value":2,"delay":100}"#);
        assert_eq!(page.host().row_value("steps", 0, "dly").as_deref(), Some("500"));
        assert_eq!(page.host().row_value("steps", 0, "add").as_deref(), Some("1"));
    }

    #[test]
    fn test_unknown_code() {
        let host = MockHost::new("/setup/tv/power");
        host.add_field("lbl", "Power");
        let mut page = page(host);

        page.load_ir(0).unwrap();
        page.on_message(r#"{"func":"ir_resp","ir_resp":"0","type":"","address":"","value":"","delay":""}"#);
        assert_eq!(page.host().html("irget").as_deref(), Some("Did not read a known code"));
        assert!(page.host().submitted().is_empty());
        assert_eq!(page.request_state(), RequestState::Failed);
    }

    #[test]
    fn test_no_inputs_does_nothing() {
        let mut page = page(MockHost::new("/setup"));
        assert_eq!(page.load_ir(0), Ok(()));
        assert!(page.host().sent().is_empty());
        assert!(page.host().has_log_containing("[learn]"));
    }
}
