//! Shared helper functions for CLI commands

use crate::core::identity::DocId;

/// Format a DocId for display, truncating if too long
///
/// IDs longer than 18 characters are truncated to 15 chars with "..." suffix.
/// This provides a consistent display format across all list/table outputs.
pub fn format_short_id(id: &DocId) -> String {
    let s = id.to_string();
    if s.len() > 18 {
        format!("{}...", &s[..15])
    } else {
        s
    }
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
