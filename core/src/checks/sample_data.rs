use crate::descriptor::{self, VariableSpec};
use crate::report::CheckResult;
use serde_json::Value;

/// Verifies the sample document carries a key for every required variable,
/// in declaration order. Presence only: a key mapped to `null` still counts
/// as present. Types and values are not the contract here.
pub fn check(variables: &[VariableSpec], sample: &Value) -> CheckResult {
    let mut r = CheckResult::new();
    for name in descriptor::required_names(variables) {
        match sample.get(name) {
            Some(value) => r.pass(format!("{}: {}", name, snippet(value))),
            None => r.fail(format!("{} - missing from sample data", name)),
        }
    }
    r
}

fn snippet(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() > 50 {
        let cut: String = rendered.chars().take(50).collect();
        format!("{}...", cut)
    } else {
        rendered
    }
}
