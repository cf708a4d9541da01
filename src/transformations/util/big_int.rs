use std::fmt;

use alloy_primitives::U256;

/// Signed integer stored as sign and 256-bit magnitude.
///
/// Covers every decimal a description may carry for amounts, ids, and
/// timestamps, from -(2^256 - 1) to 2^256 - 1. Zero is never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    negative: bool,
    magnitude: U256,
}

impl BigInt {
    pub fn from_sign_magnitude(negative: bool, magnitude: U256) -> Self {
        Self {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    /// Base-10 with an optional leading `-`. No `+`, `0x`, or separators.
    pub fn parse_decimal(s: &str) -> Option<Self> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let magnitude = U256::from_str_radix(digits, 10).ok()?;
        Some(Self::from_sign_magnitude(negative, magnitude))
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn magnitude(&self) -> U256 {
        self.magnitude
    }
}

impl From<U256> for BigInt {
    fn from(magnitude: U256) -> Self {
        Self::from_sign_magnitude(false, magnitude)
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        U256::from(value).into()
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}", self.magnitude)
    }
}
