use std::path::PathBuf;

use num_bigint::BigInt;
use num_traits::Zero;
use shamir_reconstruction::reconstruction::Share;

/// Integer polynomial used to produce shares with a known secret.
#[allow(dead_code)]
pub struct Polynomial {
    /// Coefficients in ascending order, i.e. [1, 2, 3] -> 1 + 2x + 3x^2
    pub coefficients: Vec<BigInt>,
}

#[allow(dead_code)]
impl Polynomial {
    pub fn new(coefficients: Vec<BigInt>) -> Self {
        Self { coefficients }
    }

    /// Samples a polynomial of the given degree with the given constant term and random
    /// coefficients spanning several machine words.
    pub fn random(secret: BigInt, degree: usize) -> Self {
        let mut coefficients = vec![secret];
        for _ in 0..degree {
            let high = BigInt::from(rand::random::<u64>()) << 128u32;
            let low = BigInt::from(rand::random::<u128>());
            let coefficient = high + low;
            coefficients.push(if rand::random::<bool>() {
                -coefficient
            } else {
                coefficient
            });
        }
        Self { coefficients }
    }

    pub fn secret(&self) -> &BigInt {
        &self.coefficients[0]
    }

    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        self.coefficients
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, c| acc * x + c)
    }

    pub fn shares(&self, xs: &[i64]) -> Vec<Share> {
        xs.iter()
            .map(|&x| {
                let x = BigInt::from(x);
                let y = self.evaluate(&x);
                Share::new(x, y)
            })
            .collect()
    }
}

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
