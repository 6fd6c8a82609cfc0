use std::{
    fmt,
    ops::{Add, Mul},
};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use super::ReconstructionError;

/// Arbitrary-precision fraction kept in lowest terms.
///
/// The denominator is always strictly positive and coprime with the numerator,
/// zero being represented as `0/1`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rational {
    numerator: BigInt,
    denominator: BigInt,
}

impl Rational {
    pub fn new(numerator: BigInt, denominator: BigInt) -> Result<Self, ReconstructionError> {
        if denominator.is_zero() {
            return Err(ReconstructionError::DivisionByZero);
        }
        Ok(Self::reduced(numerator, denominator))
    }

    pub fn from_integer(value: BigInt) -> Self {
        Self {
            numerator: value,
            denominator: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(BigInt::one())
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Returns the value as an integer, failing if it has a fractional part.
    pub fn to_integer(&self) -> Result<BigInt, ReconstructionError> {
        let (quotient, remainder) = self.numerator.div_rem(&self.denominator);
        if !remainder.is_zero() {
            return Err(ReconstructionError::NonIntegralResult {
                numerator: self.numerator.clone(),
                denominator: self.denominator.clone(),
            });
        }
        Ok(quotient)
    }

    // `denominator` must be non zero
    fn reduced(mut numerator: BigInt, mut denominator: BigInt) -> Self {
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }
        // gcd(0, d) = d, so zero collapses to 0/1
        let divisor = numerator.gcd(&denominator);
        if !divisor.is_one() {
            numerator /= &divisor;
            denominator /= &divisor;
        }
        Self {
            numerator,
            denominator,
        }
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, other: &Rational) -> Rational {
        let numerator = &self.numerator * &other.denominator + &other.numerator * &self.denominator;
        let denominator = &self.denominator * &other.denominator;
        Rational::reduced(numerator, denominator)
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, other: Rational) -> Rational {
        &self + &other
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, other: &Rational) -> Rational {
        let numerator = &self.numerator * &other.numerator;
        let denominator = &self.denominator * &other.denominator;
        Rational::reduced(numerator, denominator)
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, other: Rational) -> Rational {
        &self * &other
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}
