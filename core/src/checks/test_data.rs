use crate::report::CheckResult;

/// One auxiliary test-data file, read at package load time.
#[derive(Debug, Clone)]
pub struct TestDataFile {
    pub name: String,
    /// File contents, or the read error message.
    pub contents: Result<String, String>,
}

/// Parses every test-data file as JSON, independently: a bad file is one
/// failure and the remaining files are still checked.
pub fn check(files: &[TestDataFile]) -> CheckResult {
    let mut r = CheckResult::new();
    for file in files {
        match &file.contents {
            Err(e) => r.fail(format!("{} - unreadable: {}", file.name, e)),
            Ok(raw) => match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(_) => r.pass(format!("{} - valid JSON", file.name)),
                Err(e) => r.fail(format!("{} - invalid JSON: {}", file.name, e)),
            },
        }
    }
    r
}
