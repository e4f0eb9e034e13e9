//! Redirect handling
//!
//! A button response may carry a `redirect`. [`plan_redirect`] decides
//! where the client goes; [`resolve_redirect`] is the device-side rule that
//! turns a button's configured target into that `redirect` value.

use crate::codec::DeviceAction;
use crate::constants::REDIRECT_WINDOW_NAME;

/// Where a response sends the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Absolute URL, opened in a named window
    NewWindow { url: String, target: String },
    /// Same-origin path, loaded in the current document
    SameDocument { url: String },
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Decide the navigation for a button response.
///
/// Nothing happens for a missing or empty redirect, or while the device
/// reports `busy`.
pub fn plan_redirect(
    redirect: Option<&str>,
    action: Option<DeviceAction>,
    origin: &str,
) -> Option<Navigation> {
    let redirect = redirect.filter(|r| !r.is_empty())?;
    if action == Some(DeviceAction::Busy) {
        return None;
    }

    if is_absolute(redirect) {
        Some(Navigation::NewWindow {
            url: redirect.to_string(),
            target: REDIRECT_WINDOW_NAME.to_string(),
        })
    } else {
        Some(Navigation::SameDocument {
            url: format!("{}{}", origin, redirect),
        })
    }
}

/// Resolve a button's configured redirect against the page path `base`.
///
/// - empty stays empty
/// - `/abs`, `http://…`, `https://…` are used verbatim
/// - `..` is the parent of `base` (`/` at the top)
/// - anything else is relative to `base`
pub fn resolve_redirect(base: &str, redirect: &str) -> String {
    if redirect.is_empty() || redirect.starts_with('/') || is_absolute(redirect) {
        return redirect.to_string();
    }

    if redirect == ".." {
        let mut parent = base.to_string();
        if let Some(i) = parent.rfind('/') {
            parent.truncate(i);
            if parent.is_empty() {
                parent.push('/');
            }
        }
        return parent;
    }

    if base == "/" {
        format!("/{}", redirect)
    } else {
        format!("{}/{}", base, redirect)
    }
}
