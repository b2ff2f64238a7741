use crate::report::CheckResult;
use std::collections::BTreeSet;

/// Artifacts a plugin package must ship. Presence only; content is the
/// business of the other checks.
pub const REQUIRED_FILES: [&str; 7] = [
    "plugin.html",
    "plugin.json",
    "mock-api.json",
    "sample-merge-variables.json",
    "quotes.json",
    "README.md",
    "API-GUIDE.md",
];

pub fn check(present: &BTreeSet<String>) -> CheckResult {
    let mut r = CheckResult::new();
    for file in REQUIRED_FILES {
        if present.contains(file) {
            r.pass(file);
        } else {
            r.fail(format!("{} - missing", file));
        }
    }
    r
}
