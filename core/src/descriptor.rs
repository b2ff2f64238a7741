use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// The render strategy every descriptor is expected to declare.
pub const EXPECTED_RENDER_STRATEGY: &str = "handlebars";

/// Fields a descriptor must carry as non-empty strings. Every absent field
/// is reported, not just the first.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "identifier",
    "display_name",
    "description",
    "version",
    "render_strategy",
];

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").expect("variable name pattern must compile")
    })
}

/// A named slot the template consumes, optionally required in sample data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
}

/// Parsed plugin descriptor. Only produced when every structural invariant
/// holds: all required fields present, variables non-empty with unique
/// identifier-shaped names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    pub identifier: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    pub render_strategy: String,
    pub variables: Vec<VariableSpec>,
}

/// One structural problem found in a descriptor document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorProblem {
    MissingField(&'static str),
    NoVariables,
    BadVariableName { index: usize, name: String },
    DuplicateVariableName { index: usize, name: String },
}

impl fmt::Display for DescriptorProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorProblem::MissingField(field) => write!(f, "{} - missing", field),
            DescriptorProblem::NoVariables => write!(f, "no variables defined"),
            DescriptorProblem::BadVariableName { index, name } => {
                write!(f, "variable {} has an invalid name: {:?}", index, name)
            }
            DescriptorProblem::DuplicateVariableName { index, name } => {
                write!(f, "variable {} duplicates name {:?}", index, name)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse descriptor: {0}")]
    Parse(String),

    #[error("invalid descriptor: {}", .0.iter().map(|p| p.to_string()).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<DescriptorProblem>),
}

/// Everything a structural pass over a descriptor document finds, problems
/// and usable content alike. `variables` is `Some` only when the variable
/// list itself is well-formed; missing top-level fields do not block it,
/// so downstream checks can still run against the declared contract.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Each required field with its value when present as a non-empty string.
    pub fields: Vec<(&'static str, Option<String>)>,
    /// The declared render strategy when it differs from the expected one.
    pub strategy_warning: Option<String>,
    pub problems: Vec<DescriptorProblem>,
    pub variables: Option<Vec<VariableSpec>>,
}

/// Structural pass over a parsed descriptor document. Accumulates every
/// problem; never short-circuits.
pub fn inspect(root: &Value) -> Inspection {
    let mut fields = Vec::with_capacity(REQUIRED_FIELDS.len());
    let mut problems = Vec::new();

    for field in REQUIRED_FIELDS {
        let value = root
            .get(field)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty());
        match value {
            Some(s) => fields.push((field, Some(s.to_string()))),
            None => {
                fields.push((field, None));
                problems.push(DescriptorProblem::MissingField(field));
            }
        }
    }

    let strategy_warning = root
        .get("render_strategy")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty() && *s != EXPECTED_RENDER_STRATEGY)
        .map(|s| s.to_string());

    let mut variables = None;
    match root.get("variables").and_then(|v| v.as_array()) {
        None => problems.push(DescriptorProblem::NoVariables),
        Some(arr) if arr.is_empty() => problems.push(DescriptorProblem::NoVariables),
        Some(arr) => {
            let mut specs = Vec::with_capacity(arr.len());
            let mut seen: BTreeSet<String> = BTreeSet::new();
            let mut well_formed = true;
            for (index, entry) in arr.iter().enumerate() {
                let name = entry.get("name").and_then(|v| v.as_str()).unwrap_or("");
                if !name_pattern().is_match(name) {
                    problems.push(DescriptorProblem::BadVariableName {
                        index,
                        name: name.to_string(),
                    });
                    well_formed = false;
                    continue;
                }
                if !seen.insert(name.to_string()) {
                    problems.push(DescriptorProblem::DuplicateVariableName {
                        index,
                        name: name.to_string(),
                    });
                    well_formed = false;
                    continue;
                }
                let required = entry.get("required").and_then(|v| v.as_bool()).unwrap_or(false);
                specs.push(VariableSpec {
                    name: name.to_string(),
                    required,
                });
            }
            if well_formed {
                variables = Some(specs);
            }
        }
    }

    Inspection {
        fields,
        strategy_warning,
        problems,
        variables,
    }
}

impl Descriptor {
    /// Parses and structurally validates raw descriptor text. All problems
    /// found are carried in the error together; the input is never mutated.
    pub fn load(raw: &str) -> Result<Descriptor, LoadError> {
        let root: Value =
            serde_json::from_str(raw).map_err(|e| LoadError::Parse(e.to_string()))?;
        if !root.is_object() {
            return Err(LoadError::Parse(
                "descriptor root must be a JSON object".to_string(),
            ));
        }

        let inspection = inspect(&root);
        if !inspection.problems.is_empty() {
            return Err(LoadError::Invalid(inspection.problems));
        }

        let field = |name: &str| {
            root.get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        Ok(Descriptor {
            identifier: field("identifier"),
            display_name: field("display_name"),
            description: field("description"),
            version: field("version"),
            render_strategy: field("render_strategy"),
            variables: inspection.variables.unwrap_or_default(),
        })
    }

    /// Names of the variables declared as required, in declaration order.
    pub fn required_variable_names(&self) -> Vec<&str> {
        required_names(&self.variables)
    }
}

/// Names of the required variables in a declared list, in declaration order.
pub fn required_names(variables: &[VariableSpec]) -> Vec<&str> {
    variables
        .iter()
        .filter(|v| v.required)
        .map(|v| v.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_descriptor() -> Value {
        json!({
            "identifier": "widget_running",
            "display_name": "Running Dashboard",
            "description": "Weekly running stats",
            "version": "1.0.0",
            "render_strategy": "handlebars",
            "variables": [
                {"name": "total_distance", "required": true},
                {"name": "runs", "required": false}
            ]
        })
    }

    #[test]
    fn load_accepts_a_complete_descriptor() {
        let d = Descriptor::load(&valid_descriptor().to_string()).unwrap();
        assert_eq!(d.identifier, "widget_running");
        assert_eq!(d.variables.len(), 2);
        assert_eq!(d.required_variable_names(), vec!["total_distance"]);
    }

    #[test]
    fn load_reports_every_missing_field() {
        let mut doc = valid_descriptor();
        doc.as_object_mut().unwrap().remove("identifier");
        doc.as_object_mut().unwrap().remove("version");
        let err = Descriptor::load(&doc.to_string()).unwrap_err();
        match err {
            LoadError::Invalid(problems) => {
                assert_eq!(
                    problems,
                    vec![
                        DescriptorProblem::MissingField("identifier"),
                        DescriptorProblem::MissingField("version"),
                    ]
                );
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn empty_string_field_counts_as_missing() {
        let mut doc = valid_descriptor();
        doc["description"] = json!("");
        let err = Descriptor::load(&doc.to_string()).unwrap_err();
        match err {
            LoadError::Invalid(problems) => {
                assert_eq!(problems, vec![DescriptorProblem::MissingField("description")]);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn load_rejects_empty_variable_list() {
        let mut doc = valid_descriptor();
        doc["variables"] = json!([]);
        let err = Descriptor::load(&doc.to_string()).unwrap_err();
        match err {
            LoadError::Invalid(problems) => {
                assert_eq!(problems, vec![DescriptorProblem::NoVariables]);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn load_rejects_duplicate_and_ill_shaped_names() {
        let mut doc = valid_descriptor();
        doc["variables"] = json!([
            {"name": "runs"},
            {"name": "runs"},
            {"name": "9lives"}
        ]);
        let err = Descriptor::load(&doc.to_string()).unwrap_err();
        match err {
            LoadError::Invalid(problems) => {
                assert_eq!(
                    problems,
                    vec![
                        DescriptorProblem::DuplicateVariableName {
                            index: 1,
                            name: "runs".to_string()
                        },
                        DescriptorProblem::BadVariableName {
                            index: 2,
                            name: "9lives".to_string()
                        },
                    ]
                );
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn load_rejects_malformed_json() {
        assert!(matches!(
            Descriptor::load("{not json"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            Descriptor::load("[1, 2, 3]"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn inspect_keeps_variables_usable_when_fields_are_missing() {
        let mut doc = valid_descriptor();
        doc.as_object_mut().unwrap().remove("display_name");
        let inspection = inspect(&doc);
        assert_eq!(
            inspection.problems,
            vec![DescriptorProblem::MissingField("display_name")]
        );
        assert_eq!(inspection.variables.unwrap().len(), 2);
    }

    #[test]
    fn inspect_flags_unexpected_render_strategy_without_failing() {
        let mut doc = valid_descriptor();
        doc["render_strategy"] = json!("liquid");
        let inspection = inspect(&doc);
        assert!(inspection.problems.is_empty());
        assert_eq!(inspection.strategy_warning.as_deref(), Some("liquid"));
    }
}
