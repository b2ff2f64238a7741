use crate::descriptor::{self, DescriptorProblem, VariableSpec, EXPECTED_RENDER_STRATEGY};
use crate::report::CheckResult;
use serde_json::Value;

/// Validates raw descriptor text and reports every structural problem.
///
/// Also returns the declared variable list when it is usable, so the
/// sample-data and template checks can still run while unrelated fields
/// are missing.
pub fn check(raw: &str) -> (CheckResult, Option<Vec<VariableSpec>>) {
    let mut r = CheckResult::new();

    let root: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            r.fail(format!("failed to parse descriptor: {}", e));
            return (r, None);
        }
    };
    if !root.is_object() {
        r.fail("descriptor root must be a JSON object");
        return (r, None);
    }

    let inspection = descriptor::inspect(&root);

    for (field, value) in &inspection.fields {
        match value {
            Some(v) => r.pass(format!("{}: {}", field, v)),
            None => r.fail(format!("{} - missing", field)),
        }
    }

    if let Some(actual) = &inspection.strategy_warning {
        r.warn(format!(
            "render_strategy should be {:?} (found {:?})",
            EXPECTED_RENDER_STRATEGY, actual
        ));
    }

    // Field misses were already rendered in field order above.
    for problem in &inspection.problems {
        if !matches!(problem, DescriptorProblem::MissingField(_)) {
            r.fail(problem.to_string());
        }
    }
    if let Some(vars) = &inspection.variables {
        r.pass(format!("{} variables defined", vars.len()));
    }

    (r, inspection.variables)
}
