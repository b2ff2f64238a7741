use crate::descriptor::VariableSpec;
use crate::report::CheckResult;

/// Scans the template for a reference to every declared variable.
///
/// This is a substring scan, not template parsing: a variable reached
/// through a partial, composition, or a computed path is invisible here and
/// surfaces as a warning. That limitation is deliberate; upgrading to real
/// parsing would change the observable warning behavior.
///
/// Matching rules, per variable name:
/// - the literal marker `{{name}}`;
/// - for `runs`, the iteration marker `{{#each runs}}` also counts;
/// - for `has_runs`, the conditional marker `{{#if has_runs}}` also counts.
pub fn check(variables: &[VariableSpec], template: &str) -> CheckResult {
    let mut r = CheckResult::new();
    for var in variables {
        let name = var.name.as_str();
        let literal = format!("{{{{{}}}}}", name);
        if template.contains(&literal) {
            r.pass(format!("{} found in template", literal));
        } else if name == "runs" && template.contains("{{#each runs}}") {
            r.pass("{{#each runs}} found in template");
        } else if name == "has_runs" && template.contains("{{#if has_runs}}") {
            r.pass("{{#if has_runs}} found in template");
        } else {
            r.warn(format!("{} not found in template", literal));
        }
    }
    r
}
