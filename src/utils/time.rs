use chrono::{DateTime, Utc};

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a timestamp the way comment threads show it, e.g. `2025-04-23 08:02:00`.
pub fn to_display(dt: DateTime<Utc>) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}
