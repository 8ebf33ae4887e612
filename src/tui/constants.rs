//! Constants used throughout the TUI module

/// Header height: border, legend and clock row, project row, border
pub const HEADER_HEIGHT: u16 = 4;

/// Command prompt height when visible
pub const PROMPT_HEIGHT: u16 = 3;

/// Footer height
pub const FOOTER_HEIGHT: u16 = 1;

/// Share of the body width given to the list pane, in percent
pub const LIST_PANE_PERCENT: u16 = 20;

/// How long the event loop waits for input before draining async results
pub const EVENT_POLL_MS: u64 = 50;

/// Footer notice timeout in seconds
pub const NOTICE_TIMEOUT_SECS: u64 = 5;

/// Wall-clock format of the status line
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Placeholder for a detail section whose data could not be fetched
pub const UNAVAILABLE: &str = "<unavailable>";

/// Capacity of the UI event channel
pub const UI_EVENT_CHANNEL_CAPACITY: usize = 256;
