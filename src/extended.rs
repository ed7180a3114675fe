use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// A domain value extended with infinities.
///
/// Extending the domain makes unbounded ranges ordinary values: the full
/// domain is `(-∞, ∞)`, `Range::from(..4)` ends at `Finite(4)`, and
/// complement needs no special cases at either extreme.
///
/// The derived ordering puts `NegInf` below every finite value and `PosInf`
/// above.
///
/// ```
/// use range_algebra::Extended;
///
/// assert!(Extended::NegInf < Extended::Finite(i32::MIN));
/// assert!(Extended::Finite(i32::MAX) < Extended::PosInf);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum Extended<T> {
    NegInf,
    Finite(T),
    PosInf,
}

impl<T> Extended<T> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Extended::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }

    /// Returns the finite value, if there is one.
    pub fn finite(self) -> Option<T> {
        match self {
            Extended::Finite(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_finite(&self) -> Option<&T> {
        match self {
            Extended::Finite(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Ord> Extended<T> {
    /// Compares against a plain domain value without wrapping it.
    pub(crate) fn cmp_value(&self, other: &T) -> Ordering {
        match self {
            Extended::NegInf => Ordering::Less,
            Extended::Finite(value) => value.cmp(other),
            Extended::PosInf => Ordering::Greater,
        }
    }
}

impl<T> From<T> for Extended<T> {
    fn from(value: T) -> Self {
        Extended::Finite(value)
    }
}

/// Addition where an infinite term absorbs a finite one.
///
/// Only used to aggregate measures, which never pair `+∞` with `-∞`.
impl<T: Add<Output = T>> Add for Extended<T> {
    type Output = Extended<T>;

    fn add(self, rhs: Self) -> Extended<T> {
        match (self, rhs) {
            (Extended::Finite(a), Extended::Finite(b)) => Extended::Finite(a + b),
            (Extended::NegInf, _) | (_, Extended::NegInf) => Extended::NegInf,
            _ => Extended::PosInf,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Extended<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extended::NegInf => f.write_str("-∞"),
            Extended::Finite(value) => value.fmt(f),
            Extended::PosInf => f.write_str("∞"),
        }
    }
}

impl<T: FromStr> FromStr for Extended<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inf" | "+inf" | "∞" | "+∞" => Ok(Extended::PosInf),
            "-inf" | "-∞" => Ok(Extended::NegInf),
            _ => s.parse().map(Extended::Finite),
        }
    }
}
