//! Stateless timestamp formatting for diagnostics.

use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;

/// `Thu, 1 Jan 1970 00:00:00 +0000`
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%a, %-d %b %Y %H:%M:%S %z";

/// Format epoch milliseconds in UTC with a strftime `pattern`.
///
/// Returns `None` when the timestamp is out of range or the pattern contains
/// an invalid specifier.
pub fn format_timestamp(millis: i64, pattern: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let timestamp = DateTime::from_timestamp_millis(millis)?;
    Some(timestamp.format_with_items(items.into_iter()).to_string())
}
