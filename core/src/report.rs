use serde::{Deserialize, Serialize};

/// Severity of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Pass,
    Fail,
    Warn,
}

/// One finding emitted by a check, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

/// Accumulated outcome of one check: counters plus the ordered findings.
///
/// Checks never stop at the first problem; every finding in the check's
/// scope is recorded so a single run surfaces everything at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckResult {
    pub passed: usize,
    pub failed: usize,
    pub warned: usize,
    pub messages: Vec<Message>,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// A result holding exactly one failure, for sections that could not run.
    pub fn single_fail(text: impl Into<String>) -> Self {
        let mut r = Self::new();
        r.fail(text);
        r
    }

    pub fn pass(&mut self, text: impl Into<String>) {
        self.passed += 1;
        self.messages.push(Message {
            severity: Severity::Pass,
            text: text.into(),
        });
    }

    pub fn fail(&mut self, text: impl Into<String>) {
        self.failed += 1;
        self.messages.push(Message {
            severity: Severity::Fail,
            text: text.into(),
        });
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.warned += 1;
        self.messages.push(Message {
            severity: Severity::Warn,
            text: text.into(),
        });
    }
}

/// Report sections, in the fixed order they appear in a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Files,
    Schema,
    SampleData,
    Content,
    Template,
    TestData,
}

impl Section {
    pub const ORDER: [Section; 6] = [
        Section::Files,
        Section::Schema,
        Section::SampleData,
        Section::Content,
        Section::Template,
        Section::TestData,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Files => "files",
            Section::Schema => "schema",
            Section::SampleData => "sample-data",
            Section::Content => "content",
            Section::Template => "template",
            Section::TestData => "test-data",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub section: Section,
    pub result: CheckResult,
}

/// Folded totals across all sections of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub overall: String, // PASS|FAIL
    pub errors: usize,
    pub warnings: usize,
    pub sections: Vec<SectionReport>,
}

impl Outcome {
    /// Folds per-section results into totals. Message order within each
    /// section is preserved; sections keep the order they were produced in.
    pub fn summarize(sections: Vec<(Section, CheckResult)>) -> Self {
        let mut errors = 0;
        let mut warnings = 0;
        let mut out = Vec::with_capacity(sections.len());
        for (section, result) in sections {
            errors += result.failed;
            warnings += result.warned;
            out.push(SectionReport { section, result });
        }
        let overall = if errors == 0 { "PASS" } else { "FAIL" };
        Outcome {
            overall: overall.to_string(),
            errors,
            warnings,
            sections: out,
        }
    }

    /// Warnings alone never fail a run.
    pub fn success(&self) -> bool {
        self.errors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_folds_counts_and_keeps_order() {
        let mut a = CheckResult::new();
        a.pass("first");
        a.fail("second");
        let mut b = CheckResult::new();
        b.warn("third");

        let outcome = Outcome::summarize(vec![(Section::Files, a), (Section::Content, b)]);
        assert_eq!(outcome.errors, 1);
        assert_eq!(outcome.warnings, 1);
        assert_eq!(outcome.overall, "FAIL");
        assert!(!outcome.success());
        assert_eq!(outcome.sections[0].result.messages[0].text, "first");
        assert_eq!(outcome.sections[0].result.messages[1].text, "second");
        assert_eq!(outcome.sections[1].section, Section::Content);
    }

    #[test]
    fn warnings_do_not_fail_the_run() {
        let mut r = CheckResult::new();
        r.warn("only a warning");
        let outcome = Outcome::summarize(vec![(Section::Template, r)]);
        assert_eq!(outcome.overall, "PASS");
        assert!(outcome.success());
        assert_eq!(outcome.warnings, 1);
    }
}
