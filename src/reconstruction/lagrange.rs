use std::collections::HashSet;

use num_bigint::BigInt;

use super::{ReconstructionError, Share, rational::Rational};

/// Performs a Lagrange interpolation over the rationals at the origin
/// for the polynomial going through `points`.
/// The result is the value of the polynomial at x=0, i.e. its zero-degree coefficient.
///
/// Points are processed in the given order. The polynomial is assumed to have integer
/// coefficients, an interpolated value with a fractional part is reported as
/// [`ReconstructionError::NonIntegralResult`].
pub fn interpolate_at_zero(points: &[Share]) -> Result<BigInt, ReconstructionError> {
    if points.is_empty() {
        return Err(ReconstructionError::InsufficientShares {
            available: 0,
            required: 1,
        });
    }
    ensure_distinct_x(points)?;

    let mut sum = Rational::zero();
    for (i, point) in points.iter().enumerate() {
        let basis = basis_at_zero(points, i)?;
        let term = &basis * &Rational::from_integer(point.y.clone());
        sum = &sum + &term;
    }

    sum.to_integer()
}

/// Computes `L_i(0) = Π_{j≠i} (-x_j) / (x_i - x_j)`, the weight of the `i`-th point's value.
pub(crate) fn basis_at_zero(points: &[Share], i: usize) -> Result<Rational, ReconstructionError> {
    let xi = &points[i].x;
    let mut basis = Rational::one();
    for (j, point) in points.iter().enumerate() {
        if i == j {
            continue;
        }
        let xj = &point.x;
        let factor = Rational::new(-xj, xi - xj)?;
        basis = &basis * &factor;
    }
    Ok(basis)
}

fn ensure_distinct_x(points: &[Share]) -> Result<(), ReconstructionError> {
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        if !seen.insert(&point.x) {
            return Err(ReconstructionError::DuplicateXCoordinate { x: point.x.clone() });
        }
    }
    Ok(())
}
