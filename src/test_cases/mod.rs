use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use num_bigint::BigInt;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::reconstruction::{self, ReconstructionError, Secret, SelectionMode, Share};

pub mod processor;

/// A reconstruction problem as described by one input document.
///
/// ```json
/// {
///     "keys": { "n": 4, "k": 3 },
///     "1": { "base": "10", "value": "4" },
///     "2": { "base": "2", "value": "111" }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct TestCase {
    /// Total number of distributed shares, informational only
    pub n: usize,
    pub threshold: usize,
    /// Share records in document order
    pub records: Vec<ShareRecord>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ShareRecord {
    pub x: BigInt,
    pub base: u32,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum TestCaseError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed test case: {0}")]
    Json(#[from] serde_json::Error),
    #[error("field {field:?} must be a non negative integer, got {value:?}")]
    InvalidNumber { field: String, value: String },
    #[error("share {key:?} is malformed: {source}")]
    InvalidRecord {
        key: String,
        source: serde_json::Error,
    },
    #[error("share {x} cannot be decoded: {source}")]
    InvalidShare {
        x: BigInt,
        source: ReconstructionError,
    },
    #[error(transparent)]
    Reconstruction(#[from] ReconstructionError),
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

#[derive(Deserialize)]
struct RawTestCase {
    keys: RawKeys,
    #[serde(flatten)]
    records: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawKeys {
    n: NumberOrText,
    k: NumberOrText,
}

#[derive(Deserialize)]
struct RawShareRecord {
    base: NumberOrText,
    value: String,
}

/// Numbers may be written either as JSON numbers or as decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

impl NumberOrText {
    fn parse<T: FromStr>(&self, field: &str) -> Result<T, TestCaseError> {
        let raw = match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s.trim().to_string(),
        };
        raw.parse::<T>().map_err(|_| TestCaseError::InvalidNumber {
            field: field.to_string(),
            value: raw,
        })
    }
}

impl TestCase {
    pub fn load(path: &Path) -> Result<Self, TestCaseError> {
        let content = fs::read_to_string(path).map_err(|source| TestCaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, TestCaseError> {
        let raw: RawTestCase = serde_json::from_str(content)?;
        let n = raw.keys.n.parse::<usize>("n")?;
        let threshold = raw.keys.k.parse::<usize>("k")?;

        let mut records = Vec::with_capacity(raw.records.len());
        for (key, value) in raw.records {
            // `keys` is consumed by the typed field, anything else non numeric is not a share
            let Ok(x) = key.trim().parse::<BigInt>() else {
                tracing::warn!("Skipping non numeric key {:?}", key);
                continue;
            };
            let record = RawShareRecord::deserialize(value)
                .map_err(|source| TestCaseError::InvalidRecord {
                    key: key.clone(),
                    source,
                })?;
            let base = record.base.parse::<u32>(&format!("{key}.base"))?;
            records.push(ShareRecord {
                x,
                base,
                value: record.value,
            });
        }

        if records.len() != n {
            tracing::warn!(
                "Test case declares n = {} but contains {} share records",
                n,
                records.len()
            );
        }

        Ok(Self {
            n,
            threshold,
            records,
        })
    }

    /// Decodes every share record, in document order.
    pub fn decode_shares(&self) -> Result<Vec<Share>, TestCaseError> {
        self.records
            .iter()
            .map(|record| {
                Share::decode(record.x.clone(), record.base, &record.value).map_err(|source| {
                    TestCaseError::InvalidShare {
                        x: record.x.clone(),
                        source,
                    }
                })
            })
            .collect()
    }

    pub fn solve(&self, selection_mode: SelectionMode) -> Result<Secret, TestCaseError> {
        tracing::info!(
            "Total shares (n): {}, threshold (k): {}, polynomial degree: {}",
            self.n,
            self.threshold,
            self.threshold.saturating_sub(1)
        );

        let shares = self.decode_shares()?;
        for (share, record) in shares.iter().zip(&self.records) {
            tracing::debug!(
                "Decoded point {} from base {} value {:?}",
                share,
                record.base,
                record.value
            );
        }

        if let SelectionMode::FirstK = selection_mode {
            let selected = shares
                .iter()
                .take(self.threshold)
                .map(|share| share.to_string())
                .collect::<Vec<_>>();
            tracing::info!("Using first {} shares: {}", self.threshold, selected.join(", "));
        } else {
            tracing::info!(
                "Checking every {}-subset of the {} shares",
                self.threshold,
                shares.len()
            );
        }

        let secret = reconstruction::reconstruct_with(&shares, self.threshold, selection_mode)?;
        tracing::info!("Reconstructed secret: {}", secret);
        Ok(secret)
    }
}
