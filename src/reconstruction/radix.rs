use num_bigint::BigInt;
use num_traits::Zero;

use super::ReconstructionError;

pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;

/// Decodes `digits` written in positional notation with the given `base` into an integer.
///
/// Digits are `0-9` then `a-z` (case-insensitive) for the values 10 to 35.
/// Leading zeros are accepted and do not change the value.
pub fn decode(digits: &str, base: u32) -> Result<BigInt, ReconstructionError> {
    if !(MIN_RADIX..=MAX_RADIX).contains(&base) {
        return Err(ReconstructionError::InvalidBase { base });
    }
    if digits.is_empty() {
        return Err(ReconstructionError::EmptyValue);
    }

    let radix = BigInt::from(base);
    digits.chars().try_fold(BigInt::zero(), |acc, digit| {
        let value = digit
            .to_digit(MAX_RADIX)
            .filter(|v| *v < base)
            .ok_or(ReconstructionError::InvalidDigit { digit, base })?;
        Ok(acc * &radix + value)
    })
}
