//! Golden file testing
//!
//! Compares generated text against checked-in expected output under
//! `tests/golden` at the workspace root. On mismatch the failure shows the
//! first differing lines.
//!
//! ```rust,no_run
//! use lagen_testing::golden::GoldenTest;
//!
//! let header = lagen_codegen::Generator::default().generate_to_string().unwrap();
//! GoldenTest::new("la").assert_eq("h", &header);
//! ```
//!
//! When output changes intentionally, regenerate the files with:
//! ```bash
//! LAGEN_UPDATE_GOLDEN=1 cargo test
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable switching tests into update mode
pub const UPDATE_ENV_VAR: &str = "LAGEN_UPDATE_GOLDEN";

/// Differing lines printed before the diff is cut short
const MAX_REPORTED_DIFFS: usize = 10;

/// A golden file test case
pub struct GoldenTest {
    /// Name of the test, used as the golden file stem
    name: String,

    /// Directory containing golden files
    golden_dir: PathBuf,

    /// Whether to overwrite golden files instead of comparing
    update_mode: bool,
}

impl GoldenTest {
    /// Golden test reading `{workspace}/tests/golden/{name}.{ext}`
    pub fn new(name: &str) -> Self {
        let golden_dir = workspace_root().join("tests").join("golden");
        Self::with_golden_dir(name, golden_dir)
    }

    /// Golden test with a custom golden directory
    pub fn with_golden_dir(name: &str, golden_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            golden_dir: golden_dir.into(),
            update_mode: update_requested(),
        }
    }

    /// Path of the golden file for `extension`
    pub fn golden_path(&self, extension: &str) -> PathBuf {
        self.golden_dir.join(format!("{}.{}", self.name, extension))
    }

    /// Assert that `actual` matches the golden file
    ///
    /// # Panics
    ///
    /// Panics if the outputs differ (compare mode) or the golden file cannot
    /// be written (update mode).
    pub fn assert_eq(&self, extension: &str, actual: &str) {
        let path = self.golden_path(extension);
        if self.update_mode {
            self.update_golden(&path, actual);
        } else {
            self.compare_golden(&path, actual);
        }
    }

    fn update_golden(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create golden directory {:?}: {}", parent, e)
            });
        }
        fs::write(path, content)
            .unwrap_or_else(|e| panic!("Failed to write golden file {:?}: {}", path, e));
    }

    fn compare_golden(&self, path: &Path, actual: &str) {
        let expected = fs::read_to_string(path).unwrap_or_else(|e| {
            panic!(
                "Failed to read golden file {:?}: {}\n\
                 \n\
                 Hint: run with {}=1 to create it.",
                path, e, UPDATE_ENV_VAR
            )
        });

        if expected != actual {
            panic!(
                "Golden file mismatch for '{}'\n\
                 Golden file: {}\n\
                 \n\
                 {}\n\
                 To accept the new output: {}=1 cargo test {}",
                self.name,
                path.display(),
                line_diff(&expected, actual),
                UPDATE_ENV_VAR,
                self.name
            );
        }
    }
}

fn update_requested() -> bool {
    env::var(UPDATE_ENV_VAR)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Nearest ancestor of the calling crate whose `Cargo.toml` declares `[workspace]`
fn workspace_root() -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    let start = PathBuf::from(&manifest_dir);

    start
        .ancestors()
        .find(|dir| {
            fs::read_to_string(dir.join("Cargo.toml"))
                .map(|contents| contents.contains("[workspace]"))
                .unwrap_or(false)
        })
        .map(Path::to_path_buf)
        .unwrap_or_else(|| panic!("Could not find workspace root (started from {})", manifest_dir))
}

/// Line-by-line comparison summary
pub fn line_diff(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let mut diff = String::from("Differences:\n============\n\n");
    let max_lines = expected_lines.len().max(actual_lines.len());
    let mut diff_count = 0;

    for i in 0..max_lines {
        let exp_line = expected_lines.get(i).copied().unwrap_or("");
        let act_line = actual_lines.get(i).copied().unwrap_or("");

        if exp_line != act_line {
            diff_count += 1;
            if diff_count <= MAX_REPORTED_DIFFS {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  Expected: {}\n", exp_line));
                diff.push_str(&format!("  Actual:   {}\n\n", act_line));
            }
        }
    }

    if diff_count > MAX_REPORTED_DIFFS {
        diff.push_str(&format!(
            "... and {} more differences\n",
            diff_count - MAX_REPORTED_DIFFS
        ));
    }

    diff.push_str(&format!(
        "\nTotal lines: expected={}, actual={}\nDifferent lines: {}\n",
        expected_lines.len(),
        actual_lines.len(),
        diff_count
    ));

    diff
}

/// Define a `#[test]` comparing the block's output against a golden file
///
/// ```rust,no_run
/// use lagen_testing::golden_test;
///
/// golden_test!(test_default_header, "la", "h", {
///     lagen_codegen::Generator::default().generate_to_string().unwrap()
/// });
/// ```
#[macro_export]
macro_rules! golden_test {
    ($test_name:ident, $golden_name:expr, $extension:expr, $body:block) => {
        #[test]
        fn $test_name() {
            let test = $crate::golden::GoldenTest::new($golden_name);
            let actual: String = $body;
            test.assert_eq($extension, &actual);
        }
    };
}
