//! Human-readable rendering used by the console and tail transports.
//!
//! ```text
//! 2024-01-02T03:04:05.000Z  INFO: request served [ http:orders ]
//! {
//!   "status": 200
//! }
//! ```

use chrono::SecondsFormat;
use console::Style;

use crate::domain::models::{Details, ErrorDetails, LogLevel, LogRecord};

/// Render a record as a header line followed by its details, if any.
pub fn readable(record: &LogRecord, colors: bool) -> String {
    let paint = |style: Style, text: &str| {
        if colors {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    };

    let time = paint(
        Style::new().black().bright(),
        &record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    let level = paint(level_style(record.level), &record.level.as_str().to_uppercase());
    let message = paint(message_style(record.level), &record.message);
    let context = if record.context.is_empty() {
        String::new()
    } else {
        paint(
            Style::new().black().bright(),
            &format!(" [ {} ]", record.context_label()),
        )
    };

    let header = format!("{time}  {level}: {message}{context}");

    match &record.details {
        Details::Error(err) => {
            let rendered = paint(Style::new().red(), &render_error(err));
            format!("{header}\n{rendered}")
        }
        Details::Object(map) if map.is_empty() => header,
        Details::Object(map) => {
            let body = serde_json::to_string_pretty(map).unwrap_or_else(|_| format!("{map:?}"));
            format!("{header}\n{body}")
        }
    }
}

fn render_error(err: &ErrorDetails) -> String {
    let mut lines = vec![format!("{}: {}", err.name, err.message)];
    for cause in &err.causes {
        lines.push(format!("  caused by: {cause}"));
    }
    if let Some(stack) = &err.stack {
        lines.push(stack.clone());
    }
    lines.join("\n")
}

fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::new().red(),
        LogLevel::Warn => Style::new().yellow(),
        LogLevel::Info => Style::new().green(),
        LogLevel::Verbose => Style::new().cyan(),
        LogLevel::Debug => Style::new().blue().bright(),
        LogLevel::Silly => Style::new().dim(),
    }
}

fn message_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::new().red(),
        LogLevel::Warn => Style::new().yellow(),
        _ => Style::new().white().bright(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{LogEntry, PackageInfo};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn record(entry: LogEntry) -> LogRecord {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        LogRecord::finish(entry, PackageInfo::new("svc", "1.0"), timestamp)
    }

    #[test]
    fn test_header_only() {
        let rendered = readable(&record(LogEntry::new(LogLevel::Info, "served")), false);
        assert_eq!(rendered, "2024-01-02T03:04:05.000Z  INFO: served");
    }

    #[test]
    fn test_context_and_details() {
        let mut details = serde_json::Map::new();
        details.insert("status".to_string(), json!(200));
        let entry = LogEntry::new(LogLevel::Warn, "slow")
            .with_context(vec!["http".to_string(), "orders".to_string()])
            .with_details(details);

        let rendered = readable(&record(entry), false);
        assert_eq!(
            rendered,
            "2024-01-02T03:04:05.000Z  WARN: slow [ http:orders ]\n{\n  \"status\": 200\n}"
        );
    }

    #[test]
    fn test_error_details() {
        let mut err = ErrorDetails::new("WriteError", "write failed");
        err.causes.push("disk full".to_string());
        let entry = LogEntry::new(LogLevel::Error, "save").with_details(err);

        let rendered = readable(&record(entry), false);
        assert_eq!(
            rendered,
            "2024-01-02T03:04:05.000Z  ERROR: save\nWriteError: write failed\n  caused by: disk full"
        );
    }
}
