//! Centralized constants for the web remote
//!
//! Timing values, element ids and user-visible strings are defined here
//! so the page controllers and their tests agree on them.

// =============================================================================
// Timing
// =============================================================================

/// Delay after pointer-down before a gesture becomes a hold ("press")
pub const HOLD_THRESHOLD_MS: u32 = 250;

/// How long the "Sent" notice stays visible on the test page
pub const SENT_NOTICE_CLEAR_MS: u32 = 750;

// =============================================================================
// DOM contract
// =============================================================================

/// `name` attribute identifying a command button
pub const COMMAND_BUTTON_NAME: &str = "btnVal";

/// `PointerEvent.buttons` value for the primary button alone
pub const PRIMARY_BUTTONS: u16 = 1;

/// Status indicator element id
pub const LED_ELEMENT_ID: &str = "led";

/// Window name used for absolute redirects
pub const REDIRECT_WINDOW_NAME: &str = "redirect";

/// `class` value of the done button once the page is saved
pub const SAVED_MARKER: &str = "saved";

// =============================================================================
// Notices
// =============================================================================

/// Blank notice (keeps the line height)
pub const BLANK_NOTICE: &str = "&nbsp;";

pub const NOTICE_CLICK_REMOTE: &str = "Click button on remote";
pub const NOTICE_UNKNOWN_CODE: &str = "Did not read a known code";
pub const NOTICE_SENDING: &str = "Sending ...";
pub const NOTICE_SENT: &str = "Sent";
pub const NOTICE_TIMED_OUT: &str = "Timed out";

/// Network list placeholder while a scan is running
pub const SCAN_PLACEHOLDER: &str = "-- Scanning --";

/// First entry of a populated network list
pub const CHOOSE_PLACEHOLDER: &str = "-- Choose WiFi --";

/// Network list placeholder when a scan never answered
pub const SCAN_TIMED_OUT: &str = "-- Timed out --";

pub const UNSAVED_PROMPT: &str = "Changes not saved! Close anyway?";
