use std::{fmt, str::FromStr};

use num_bigint::BigInt;
use thiserror::Error;

pub mod lagrange;
pub mod radix;
pub mod rational;

/// Constant term of the interpolated polynomial.
pub type Secret = BigInt;

/// A point `(x, y)` of the secret-encoding polynomial.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Share {
    pub x: BigInt,
    pub y: BigInt,
}

impl Share {
    pub fn new(x: BigInt, y: BigInt) -> Self {
        Self { x, y }
    }

    /// Builds a share whose value is written as `digits` in the given `base`.
    pub fn decode(x: BigInt, base: u32, digits: &str) -> Result<Self, ReconstructionError> {
        let y = radix::decode(digits, base)?;
        Ok(Self { x, y })
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Error)]
pub enum ReconstructionError {
    #[error("base {base} is outside of the supported range [2, 36]")]
    InvalidBase { base: u32 },
    #[error("digit {digit:?} is invalid for base {base}")]
    InvalidDigit { digit: char, base: u32 },
    #[error("share value must contain at least one digit")]
    EmptyValue,
    #[error("x coordinate {x} is used by more than one share")]
    DuplicateXCoordinate { x: BigInt },
    #[error("division by zero")]
    DivisionByZero,
    #[error("interpolated value {numerator}/{denominator} is not an integer")]
    NonIntegralResult {
        numerator: BigInt,
        denominator: BigInt,
    },
    #[error("not enough shares to reconstruct the secret: {available} available, {required} required")]
    InsufficientShares { available: usize, required: usize },
    #[error("threshold must be at least 1")]
    InvalidThreshold,
    #[error("shares are inconsistent: subset {subset:?} yields {found}, expected {expected}")]
    InconsistentShares {
        expected: BigInt,
        found: BigInt,
        subset: Vec<BigInt>,
    },
}

/// How the shares used for interpolation are picked.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SelectionMode {
    /// Interpolate the first `k` shares in the given order.
    #[default]
    FirstK,
    /// Interpolate every `k`-subset and require all of them to agree.
    AllSubsets,
}

#[derive(Debug, Error)]
#[error("unknown selection mode {0:?}, expected \"first-k\" or \"all-subsets\"")]
pub struct ParseSelectionModeError(String);

impl FromStr for SelectionMode {
    type Err = ParseSelectionModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-k" => Ok(Self::FirstK),
            "all-subsets" => Ok(Self::AllSubsets),
            _ => Err(ParseSelectionModeError(s.to_string())),
        }
    }
}

/// Recovers the secret from the first `threshold` shares.
///
/// # Errors
/// * `InvalidThreshold` - If `threshold` is zero.
/// * `InsufficientShares` - If fewer than `threshold` shares are given.
/// * Any interpolation error, unchanged.
pub fn reconstruct(shares: &[Share], threshold: usize) -> Result<Secret, ReconstructionError> {
    ensure_enough_shares(shares, threshold)?;
    lagrange::interpolate_at_zero(&shares[..threshold])
}

/// Recovers the secret from every `threshold`-subset of `shares` and checks they all agree.
///
/// # Errors
/// Same as [`reconstruct`], plus `InconsistentShares` when two subsets disagree.
pub fn reconstruct_verified(
    shares: &[Share],
    threshold: usize,
) -> Result<Secret, ReconstructionError> {
    ensure_enough_shares(shares, threshold)?;

    let mut subsets = combinations(shares, threshold);
    let Some(first) = subsets.next() else {
        return Err(ReconstructionError::InsufficientShares {
            available: shares.len(),
            required: threshold,
        });
    };
    let expected = lagrange::interpolate_at_zero(&first)?;
    for subset in subsets {
        let found = lagrange::interpolate_at_zero(&subset)?;
        if found != expected {
            return Err(ReconstructionError::InconsistentShares {
                expected,
                found,
                subset: subset.into_iter().map(|share| share.x).collect(),
            });
        }
    }

    Ok(expected)
}

/// Recovers the secret with the given selection policy.
///
/// # Errors
/// Same as [`reconstruct`] for `FirstK` and [`reconstruct_verified`] for `AllSubsets`.
pub fn reconstruct_with(
    shares: &[Share],
    threshold: usize,
    mode: SelectionMode,
) -> Result<Secret, ReconstructionError> {
    match mode {
        SelectionMode::FirstK => reconstruct(shares, threshold),
        SelectionMode::AllSubsets => reconstruct_verified(shares, threshold),
    }
}

/// Lists every `k`-subset of `shares`, in lexicographic order of their indices.
///
/// Subsets are produced one at a time, only the current one is held in memory.
pub fn combinations(shares: &[Share], k: usize) -> Combinations<'_> {
    let indices = (k <= shares.len()).then(|| (0..k).collect());
    Combinations { shares, indices }
}

pub struct Combinations<'a> {
    shares: &'a [Share],
    /// Indices of the next subset, `None` once exhausted
    indices: Option<Vec<usize>>,
}

impl Iterator for Combinations<'_> {
    type Item = Vec<Share>;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.indices.as_mut()?;
        let subset = indices.iter().map(|&i| self.shares[i].clone()).collect();

        let n = self.shares.len();
        let k = indices.len();
        // Rightmost index that can still move forward
        match (0..k).rev().find(|&p| indices[p] < n - k + p) {
            Some(position) => {
                indices[position] += 1;
                for p in position + 1..k {
                    indices[p] = indices[p - 1] + 1;
                }
            }
            None => self.indices = None,
        }

        Some(subset)
    }
}

fn ensure_enough_shares(shares: &[Share], threshold: usize) -> Result<(), ReconstructionError> {
    if threshold == 0 {
        return Err(ReconstructionError::InvalidThreshold);
    }
    if shares.len() < threshold {
        return Err(ReconstructionError::InsufficientShares {
            available: shares.len(),
            required: threshold,
        });
    }
    Ok(())
}
