//! Exact rational numbers
//!
//! Every frequency, coincidence index and threshold in quill is a [`Ratio`],
//! so comparisons are exact and results reproducible across platforms.
//! It wraps [`num_rational::BigRational`]: numerators and denominators are
//! arbitrary precision, so sums over hand-made models can't overflow. Values
//! are kept reduced with a strictly positive denominator, which makes
//! structural equality agree with numeric equality.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reduced fraction `numer / denom` with `denom > 0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ratio(BigRational);

/// Failure to parse a `"n/d"` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRatioError {
    #[error("invalid integer in ratio: {0:?}")]
    InvalidInteger(String),

    #[error("ratio has a zero denominator")]
    ZeroDenominator,
}

impl Ratio {
    /// Build and reduce `numer / denom`.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero. Use [`Ratio::checked_new`] for untrusted input.
    pub fn new(numer: i128, denom: i128) -> Self {
        Self(BigRational::new(numer.into(), denom.into()))
    }

    /// Build and reduce `numer / denom`, or `None` when `denom` is zero.
    pub fn checked_new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Option<Self> {
        let denom = denom.into();
        if denom.is_zero() {
            return None;
        }
        Some(Self(BigRational::new(numer.into(), denom)))
    }

    pub fn from_integer(n: i128) -> Self {
        Self(BigRational::from_integer(n.into()))
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i128> for Ratio {
    fn from(n: i128) -> Self {
        Self::from_integer(n)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Ratio {
            type Output = Ratio;

            fn $method(self, rhs: Ratio) -> Ratio {
                Ratio(self.0.$method(rhs.0))
            }
        }

        impl<'a> $trait<&'a Ratio> for Ratio {
            type Output = Ratio;

            fn $method(self, rhs: &'a Ratio) -> Ratio {
                Ratio(self.0.$method(&rhs.0))
            }
        }

        impl<'a, 'b> $trait<&'b Ratio> for &'a Ratio {
            type Output = Ratio;

            fn $method(self, rhs: &'b Ratio) -> Ratio {
                Ratio((&self.0).$method(&rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
// dividing by zero panics
forward_binop!(Div, div);

impl Neg for Ratio {
    type Output = Ratio;

    fn neg(self) -> Ratio {
        Ratio(-self.0)
    }
}

impl Sum for Ratio {
    fn sum<I: Iterator<Item = Ratio>>(iter: I) -> Ratio {
        iter.fold(Ratio::zero(), |acc, r| acc + r)
    }
}

impl<'a> Sum<&'a Ratio> for Ratio {
    fn sum<I: Iterator<Item = &'a Ratio>>(iter: I) -> Ratio {
        iter.fold(Ratio::zero(), |acc, r| acc + r)
    }
}

impl Zero for Ratio {
    fn zero() -> Self {
        Self(BigRational::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Ratio {
    fn one() -> Self {
        Self(BigRational::one())
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom().is_one() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl FromStr for Ratio {
    type Err = ParseRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<BigInt>()
                .map_err(|_| ParseRatioError::InvalidInteger(part.to_string()))
        };

        match s.split_once('/') {
            Some((n, d)) => {
                Ratio::checked_new(parse(n)?, parse(d)?).ok_or(ParseRatioError::ZeroDenominator)
            }
            None => Ok(Ratio(BigRational::from_integer(parse(s)?))),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
