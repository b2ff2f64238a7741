use crate::report::CheckResult;
use serde_json::Value;

/// Minimum entry count before a thin collection draws a warning.
pub const DEFAULT_MIN_ENTRIES: usize = 10;

/// Verifies the content collection is an array of non-empty strings.
/// Every invalid entry is reported with its index; a short collection is a
/// warning, never an error.
pub fn check(collection: &Value, min_entries: usize) -> CheckResult {
    let mut r = CheckResult::new();

    let entries = match collection.as_array() {
        Some(a) => a,
        None => {
            r.fail("content collection should be an array");
            return r;
        }
    };

    r.pass(format!("{} entries loaded", entries.len()));
    if entries.len() < min_entries {
        r.warn(format!(
            "consider adding more entries (current: {}, minimum: {})",
            entries.len(),
            min_entries
        ));
    }

    for (index, entry) in entries.iter().enumerate() {
        match entry.as_str() {
            Some(s) if !s.is_empty() => {}
            _ => r.fail(format!("entry {} is invalid", index)),
        }
    }

    r
}
