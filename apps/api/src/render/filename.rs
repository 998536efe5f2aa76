use chrono::{DateTime, Utc};

use crate::render::OutputFormat;

/// `<title>_<YYYY-MM-DDTHH-MM-SS>.<ext>`: an ISO-8601 timestamp cut to whole
/// seconds with `:` and `.` replaced by `-`.
pub fn document_filename(title: &str, at: DateTime<Utc>, format: OutputFormat) -> String {
    let timestamp: String = at
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();

    format!("{title}_{timestamp}.{}", format.extension())
}
