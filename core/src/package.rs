use crate::checks;
use crate::checks::test_data::TestDataFile;
use crate::error::{CoreError, CoreResult};
use crate::report::{CheckResult, Outcome, Section};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DESCRIPTOR_FILE: &str = "plugin.json";
pub const TEMPLATE_FILE: &str = "plugin.html";
pub const SAMPLE_DATA_FILE: &str = "sample-merge-variables.json";
pub const CONTENT_FILE: &str = "quotes.json";
pub const TEST_DATA_DIR: &str = "test-data";

/// All artifacts of one package, read once from a directory and held
/// immutably for the run. Missing artifacts are recorded here and become
/// section failures during validation; only an unusable package root is
/// fatal to the load itself.
#[derive(Debug, Clone)]
pub struct PluginPackage {
    pub root: PathBuf,
    /// Names from the required-files list that exist in the directory.
    pub present: BTreeSet<String>,
    pub descriptor: Option<String>,
    pub template: Option<String>,
    pub sample_data: Option<String>,
    pub content: Option<String>,
    /// Test-data files, or the reason the directory could not be listed.
    pub test_data: Result<Vec<TestDataFile>, String>,
}

impl PluginPackage {
    pub fn load(root: impl AsRef<Path>) -> CoreResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(CoreError::InvalidInput(format!(
                "package root {} is not a directory",
                root.display()
            )));
        }

        let mut present = BTreeSet::new();
        for name in checks::files::REQUIRED_FILES {
            if root.join(name).is_file() {
                present.insert(name.to_string());
            }
        }

        let read = |name: &str| fs::read_to_string(root.join(name)).ok();

        Ok(PluginPackage {
            root: root.to_path_buf(),
            present,
            descriptor: read(DESCRIPTOR_FILE),
            template: read(TEMPLATE_FILE),
            sample_data: read(SAMPLE_DATA_FILE),
            content: read(CONTENT_FILE),
            test_data: load_test_data(&root.join(TEST_DATA_DIR)),
        })
    }

    pub fn validate(&self) -> Outcome {
        self.validate_with(checks::content::DEFAULT_MIN_ENTRIES)
    }

    /// Runs every section in the fixed report order. A section whose input
    /// is missing or unparseable records its own failure; the remaining
    /// sections still run, so one bad artifact never aborts the run.
    pub fn validate_with(&self, min_content_entries: usize) -> Outcome {
        let mut sections = Vec::with_capacity(Section::ORDER.len());

        sections.push((Section::Files, checks::files::check(&self.present)));

        let (schema_result, variables) = match &self.descriptor {
            Some(raw) => checks::schema::check(raw),
            None => (
                CheckResult::single_fail(format!("{} could not be read", DESCRIPTOR_FILE)),
                None,
            ),
        };
        sections.push((Section::Schema, schema_result));

        let sample_result = match (&variables, &self.sample_data) {
            (None, _) => CheckResult::single_fail("skipped: no usable variable declarations"),
            (Some(_), None) => {
                CheckResult::single_fail(format!("{} could not be read", SAMPLE_DATA_FILE))
            }
            (Some(vars), Some(raw)) => match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(doc) => checks::sample_data::check(vars, &doc),
                Err(e) => CheckResult::single_fail(format!("failed to parse sample data: {}", e)),
            },
        };
        sections.push((Section::SampleData, sample_result));

        let content_result = match &self.content {
            None => CheckResult::single_fail(format!("{} could not be read", CONTENT_FILE)),
            Some(raw) => match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(value) => checks::content::check(&value, min_content_entries),
                Err(e) => {
                    CheckResult::single_fail(format!("failed to parse content collection: {}", e))
                }
            },
        };
        sections.push((Section::Content, content_result));

        let template_result = match (&variables, &self.template) {
            (None, _) => CheckResult::single_fail("skipped: no usable variable declarations"),
            (Some(_), None) => {
                CheckResult::single_fail(format!("{} could not be read", TEMPLATE_FILE))
            }
            (Some(vars), Some(text)) => checks::template::check(vars, text),
        };
        sections.push((Section::Template, template_result));

        let test_data_result = match &self.test_data {
            Ok(files) => checks::test_data::check(files),
            Err(e) => CheckResult::single_fail(e.clone()),
        };
        sections.push((Section::TestData, test_data_result));

        Outcome::summarize(sections)
    }
}

fn load_test_data(dir: &Path) -> Result<Vec<TestDataFile>, String> {
    if !dir.is_dir() {
        return Err(format!("{} directory missing", TEST_DATA_DIR));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => return Err(format!("failed to list {}: {}", TEST_DATA_DIR, e)),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let name = path
            .strip_prefix(dir)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| entry.file_name().to_string_lossy().into_owned());
        let contents = fs::read_to_string(path).map_err(|e| e.to_string());
        files.push(TestDataFile { name, contents });
    }
    Ok(files)
}
