use std::path::{Path, PathBuf};

use anyhow::anyhow;
use futures::{StreamExt, stream};

use crate::{
    Config, DEFAULT_CONCURRENCY,
    reconstruction::{Secret, SelectionMode},
};

use super::{TestCase, TestCaseError};

#[derive(Clone, Copy, Debug)]
pub struct ProcessingOptions {
    /// Maximum number of test cases solved at the same time
    pub concurrency: usize,
    pub selection_mode: SelectionMode,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            selection_mode: SelectionMode::FirstK,
        }
    }
}

impl From<&Config> for ProcessingOptions {
    fn from(config: &Config) -> Self {
        Self {
            concurrency: config.concurrency,
            selection_mode: config.selection_mode,
        }
    }
}

#[derive(Debug)]
pub struct TestCaseReport {
    /// 1-based position of the test case in the input list
    pub index: usize,
    pub path: PathBuf,
    pub result: Result<Secret, TestCaseError>,
}

/// Solves every test case, running up to `options.concurrency` of them in parallel.
///
/// Reports are returned in the order of `paths`. A failing test case does not prevent
/// the others from being processed.
pub async fn process_test_cases(
    paths: Vec<PathBuf>,
    options: &ProcessingOptions,
) -> Vec<TestCaseReport> {
    let selection_mode = options.selection_mode;
    stream::iter(paths.into_iter().enumerate())
        .map(|(i, path)| async move {
            let index = i + 1;
            let task_path = path.clone();
            let result = tokio::task::spawn_blocking(move || {
                process_test_case(index, &task_path, selection_mode)
            })
            .await
            .unwrap_or_else(|e| {
                Err(TestCaseError::Unknown(anyhow!(
                    "test case task did not complete: {e}"
                )))
            });
            if let Err(e) = &result {
                tracing::error!("Test case {} ({}) failed: {}", index, path.display(), e);
            }
            TestCaseReport {
                index,
                path,
                result,
            }
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await
}

/// Loads and solves a single test case file.
pub fn process_test_case(
    index: usize,
    path: &Path,
    selection_mode: SelectionMode,
) -> Result<Secret, TestCaseError> {
    let span = tracing::info_span!("test_case", index, path = %path.display());
    let _entered = span.enter();

    let test_case = TestCase::load(path)?;
    test_case.solve(selection_mode)
}
