use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not, Sub};
use std::str::FromStr;

use num_traits::Zero;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseRangeError;
use crate::extended::Extended;
use crate::set::RangeSet;

/// A single contiguous interval with independently inclusive or exclusive
/// bounds, over a domain extended with `±∞`.
///
/// A `Range` is a value object: no operation mutates one, and every
/// constructor funnels through the same normalization so that equal sets of
/// points have equal representations. In particular there is exactly one
/// empty range, and infinite bounds are always exclusive.
///
/// ```
/// use range_algebra::Range;
///
/// let r: Range<i32> = "[0, 10)".parse().unwrap();
/// assert!(r.contains(&0));
/// assert!(!r.contains(&10));
/// assert_eq!(r, Range::new(0, 10));
/// assert_eq!(r, (0..10).into());
/// ```
///
/// Ranges are ordered by their least element first, so sorting a collection
/// of ranges orders them left to right along the domain.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Range<T> {
    start: Extended<T>,
    end: Extended<T>,
    start_inc: bool,
    end_inc: bool,
}

impl<T: Ord> Range<T> {
    fn normalized(
        start: Extended<T>,
        end: Extended<T>,
        start_inc: bool,
        end_inc: bool,
    ) -> Range<T> {
        // No value ever equals a sentinel, so an inclusive infinite bound
        // would be a second spelling of the exclusive one.
        let start_inc = start_inc && start.is_finite();
        let end_inc = end_inc && end.is_finite();
        let empty = match start.cmp(&end) {
            Ordering::Greater => true,
            Ordering::Equal => !(start_inc && end_inc),
            Ordering::Less => false,
        };
        if empty {
            Range::empty()
        } else {
            Range {
                start,
                end,
                start_inc,
                end_inc,
            }
        }
    }

    /// The empty range. Contains nothing and acts as the zero of the algebra.
    pub fn empty() -> Range<T> {
        Range {
            start: Extended::PosInf,
            end: Extended::NegInf,
            start_inc: false,
            end_inc: false,
        }
    }

    /// The full domain `(-∞, ∞)`.
    pub fn full() -> Range<T> {
        Range {
            start: Extended::NegInf,
            end: Extended::PosInf,
            start_inc: false,
            end_inc: false,
        }
    }

    /// Half-open `[start, end)`, the most common construction.
    pub fn new(start: T, end: T) -> Range<T> {
        Range::normalized(Extended::Finite(start), Extended::Finite(end), true, false)
    }

    /// Closed `[start, end]`.
    pub fn closed(start: T, end: T) -> Range<T> {
        Range::normalized(Extended::Finite(start), Extended::Finite(end), true, true)
    }

    /// Open `(start, end)`.
    pub fn open(start: T, end: T) -> Range<T> {
        Range::normalized(Extended::Finite(start), Extended::Finite(end), false, false)
    }

    /// The degenerate range `[value, value]` containing exactly one point.
    pub fn singleton(value: T) -> Range<T>
    where
        T: Clone,
    {
        Range::closed(value.clone(), value)
    }

    /// The explicit four-field constructor. `start > end` and degenerate
    /// half-open forms normalize to the empty range rather than erroring;
    /// the algebra keeps its zero element.
    pub fn bounded(
        start: Extended<T>,
        end: Extended<T>,
        start_inc: bool,
        end_inc: bool,
    ) -> Range<T> {
        Range::normalized(start, end, start_inc, end_inc)
    }

    pub fn start(&self) -> &Extended<T> {
        &self.start
    }

    pub fn end(&self) -> &Extended<T> {
        &self.end
    }

    pub fn start_inclusive(&self) -> bool {
        self.start_inc
    }

    pub fn end_inclusive(&self) -> bool {
        self.end_inc
    }

    pub fn is_empty(&self) -> bool {
        // Canonical form: only the empty range has start above end.
        self.start > self.end
    }

    pub fn is_full(&self) -> bool {
        self.start == Extended::NegInf && self.end == Extended::PosInf
    }

    /// Membership test for a single domain value.
    pub fn contains(&self, value: &T) -> bool {
        let above_start = match self.start.cmp_value(value) {
            Ordering::Less => true,
            Ordering::Equal => self.start_inc,
            Ordering::Greater => false,
        };
        let below_end = match self.end.cmp_value(value) {
            Ordering::Greater => true,
            Ordering::Equal => self.end_inc,
            Ordering::Less => false,
        };
        above_start && below_end
    }

    /// True if every point of `other` lies in `self`. The empty range is
    /// covered by everything.
    pub fn covers(&self, other: &Range<T>) -> bool {
        other.is_empty()
            || (!self.is_empty()
                && self.lower_cmp(other) != Ordering::Greater
                && self.upper_cmp(other) != Ordering::Less)
    }

    /// True iff the intersection with `other` is non-empty.
    pub fn overlaps(&self, other: &Range<T>) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (lower, lower_inc) = if self.lower_cmp(other) == Ordering::Less {
            (&other.start, other.start_inc)
        } else {
            (&self.start, self.start_inc)
        };
        let (upper, upper_inc) = if self.upper_cmp(other) == Ordering::Greater {
            (&other.end, other.end_inc)
        } else {
            (&self.end, self.end_inc)
        };
        match lower.cmp(upper) {
            Ordering::Less => true,
            Ordering::Equal => lower_inc && upper_inc,
            Ordering::Greater => false,
        }
    }

    /// True iff the two ranges are disjoint but share a boundary value that
    /// is covered exactly once across the pair, so their union is one
    /// contiguous range: `[0, 1)` is adjacent to `[1, 2)`, while `(0, 1)`
    /// and `(1, 2)` leave `1` uncovered and are not.
    pub fn is_adjacent_to(&self, other: &Range<T>) -> bool {
        fn joins<T: Ord>(end: &Range<T>, start: &Range<T>) -> bool {
            end.end == start.start && end.end_inc != start.start_inc
        }
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !self.overlaps(other) && (joins(self, other) || joins(other, self))
    }

    /// Overlapping or adjacent: the union is one contiguous range.
    pub fn touches(&self, other: &Range<T>) -> bool {
        self.overlaps(other) || self.is_adjacent_to(other)
    }

    /// The smallest single range covering both operands, taking the more
    /// inclusive bound at each extremal point. Only meaningful for touching
    /// (or empty) operands; `merged` is the checked entry point.
    pub(crate) fn hull(&self, other: &Range<T>) -> Range<T>
    where
        T: Clone,
    {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let (start, start_inc) = if self.lower_cmp(other) == Ordering::Greater {
            (other.start.clone(), other.start_inc)
        } else {
            (self.start.clone(), self.start_inc)
        };
        let (end, end_inc) = if self.upper_cmp(other) == Ordering::Less {
            (other.end.clone(), other.end_inc)
        } else {
            (self.end.clone(), self.end_inc)
        };
        Range {
            start,
            end,
            start_inc,
            end_inc,
        }
    }

    /// The single contiguous union of the two ranges, or `None` when they
    /// neither overlap nor are adjacent.
    pub fn merged(&self, other: &Range<T>) -> Option<Range<T>>
    where
        T: Clone,
    {
        if self.is_empty() || other.is_empty() || self.touches(other) {
            Some(self.hull(other))
        } else {
            None
        }
    }

    /// Union of the two ranges: one member if they touch, two otherwise.
    pub fn union(&self, other: &Range<T>) -> RangeSet<T>
    where
        T: Clone,
    {
        RangeSet::from_ranges(vec![self.clone(), other.clone()])
    }

    /// Intersection of the two ranges, possibly empty. At a shared boundary
    /// the less inclusive bound wins.
    pub fn intersection(&self, other: &Range<T>) -> Range<T>
    where
        T: Clone,
    {
        if self.is_empty() || other.is_empty() {
            return Range::empty();
        }
        let (start, start_inc) = if self.lower_cmp(other) == Ordering::Less {
            (other.start.clone(), other.start_inc)
        } else {
            (self.start.clone(), self.start_inc)
        };
        let (end, end_inc) = if self.upper_cmp(other) == Ordering::Greater {
            (other.end.clone(), other.end_inc)
        } else {
            (self.end.clone(), self.end_inc)
        };
        Range::normalized(start, end, start_inc, end_inc)
    }

    /// Points of `self` not in `other`. Subtracting an overlapping middle
    /// segment splits the range into two pieces.
    pub fn difference(&self, other: &Range<T>) -> RangeSet<T>
    where
        T: Clone,
    {
        let below = Range::normalized(
            Extended::NegInf,
            other.start.clone(),
            false,
            !other.start_inc,
        );
        let above = Range::normalized(other.end.clone(), Extended::PosInf, !other.end_inc, false);
        RangeSet::from_ranges(vec![self.intersection(&below), self.intersection(&above)])
    }

    /// Points in exactly one of the two ranges:
    /// `(self ∪ other) − (self ∩ other)`.
    pub fn symmetric_difference(&self, other: &Range<T>) -> RangeSet<T>
    where
        T: Clone,
    {
        let common = RangeSet::from(self.intersection(other));
        self.union(other).difference(&common)
    }

    /// Complement within the full domain, with inclusivity flipped at the
    /// two cut points. The empty range inverts to the full domain and vice
    /// versa.
    pub fn complement(&self) -> RangeSet<T>
    where
        T: Clone,
    {
        Range::full().difference(self)
    }

    /// `end - start` in the domain's magnitude type; zero for the empty
    /// range, `∞` when either bound is infinite.
    pub fn measure<M>(&self) -> Extended<M>
    where
        T: Clone + Sub<Output = M>,
        M: Zero,
    {
        if self.is_empty() {
            return Extended::Finite(M::zero());
        }
        match (&self.start, &self.end) {
            (Extended::Finite(start), Extended::Finite(end)) => {
                Extended::Finite(end.clone() - start.clone())
            }
            _ => Extended::PosInf,
        }
    }

    /// This range with both endpoints transformed by `f`, which must be
    /// order-preserving for the result to describe the image of the set.
    pub fn map<U, F>(&self, f: F) -> Range<U>
    where
        U: Ord,
        F: Fn(&T) -> U,
    {
        let apply = |bound: &Extended<T>| match bound {
            Extended::NegInf => Extended::NegInf,
            Extended::Finite(value) => Extended::Finite(f(value)),
            Extended::PosInf => Extended::PosInf,
        };
        Range::normalized(
            apply(&self.start),
            apply(&self.end),
            self.start_inc,
            self.end_inc,
        )
    }

    /// Ordering of lower bounds; at equal values an inclusive bound lies
    /// further left than an exclusive one.
    pub(crate) fn lower_cmp(&self, other: &Range<T>) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| other.start_inc.cmp(&self.start_inc))
    }

    /// Ordering of upper bounds; at equal values an exclusive bound lies
    /// further left than an inclusive one.
    pub(crate) fn upper_cmp(&self, other: &Range<T>) -> Ordering {
        self.end
            .cmp(&other.end)
            .then_with(|| self.end_inc.cmp(&other.end_inc))
    }

    /// True if every point of the range is strictly below `value`.
    pub(crate) fn lies_below(&self, value: &T) -> bool {
        !self.is_empty()
            && match self.end.cmp_value(value) {
                Ordering::Less => true,
                Ordering::Equal => !self.end_inc,
                Ordering::Greater => false,
            }
    }
}

impl<T: Ord> Ord for Range<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lower_cmp(other).then_with(|| self.upper_cmp(other))
    }
}

impl<T: Ord> PartialOrd for Range<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> From<std::ops::Range<T>> for Range<T> {
    fn from(range: std::ops::Range<T>) -> Self {
        Range::new(range.start, range.end)
    }
}

impl<T: Ord> From<std::ops::RangeInclusive<T>> for Range<T> {
    fn from(range: std::ops::RangeInclusive<T>) -> Self {
        let (start, end) = range.into_inner();
        Range::closed(start, end)
    }
}

impl<T: Ord> From<std::ops::RangeFrom<T>> for Range<T> {
    fn from(range: std::ops::RangeFrom<T>) -> Self {
        Range::bounded(Extended::Finite(range.start), Extended::PosInf, true, false)
    }
}

impl<T: Ord> From<std::ops::RangeTo<T>> for Range<T> {
    fn from(range: std::ops::RangeTo<T>) -> Self {
        Range::bounded(Extended::NegInf, Extended::Finite(range.end), false, false)
    }
}

impl<T: Ord> From<std::ops::RangeToInclusive<T>> for Range<T> {
    fn from(range: std::ops::RangeToInclusive<T>) -> Self {
        Range::bounded(Extended::NegInf, Extended::Finite(range.end), false, true)
    }
}

impl<T: Ord> From<std::ops::RangeFull> for Range<T> {
    fn from(_: std::ops::RangeFull) -> Self {
        Range::full()
    }
}

impl<T: fmt::Debug> fmt::Debug for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if matches!(
            (&self.start, &self.end),
            (Extended::PosInf, Extended::NegInf)
        ) {
            return f.write_str("∅");
        }
        let open = if self.start_inc { '[' } else { '(' };
        let close = if self.end_inc { ']' } else { ')' };
        match &self.start {
            Extended::NegInf => write!(f, "{open}-∞, ")?,
            Extended::Finite(value) => write!(f, "{open}{value:?}, ")?,
            Extended::PosInf => write!(f, "{open}∞, ")?,
        }
        match &self.end {
            Extended::NegInf => write!(f, "-∞{close}"),
            Extended::Finite(value) => write!(f, "{value:?}{close}"),
            Extended::PosInf => write!(f, "∞{close}"),
        }
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("∅");
        }
        let open = if self.start_inc { '[' } else { '(' };
        let close = if self.end_inc { ']' } else { ')' };
        write!(f, "{open}{}, {}{close}", self.start, self.end)
    }
}

/// Bracket notation: `('['|'(') value ',' value (']'|')')`, with whitespace
/// tolerated around the values and `inf`/`-inf` accepted for unbounded ends.
/// `[v]` is shorthand for the singleton `[v, v]`. Value parsing is delegated
/// to `T::from_str`.
impl<T: Ord + Clone + FromStr> FromStr for Range<T> {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() < 2 {
            return Err(ParseRangeError::Brackets);
        }
        let start_inc = match s.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(ParseRangeError::Brackets),
        };
        let end_inc = match s.chars().next_back() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(ParseRangeError::Brackets),
        };
        let body = &s[1..s.len() - 1];
        match body.split_once(',') {
            Some((start, end)) => {
                if end.contains(',') {
                    return Err(ParseRangeError::Separator);
                }
                Ok(Range::bounded(
                    parse_endpoint(start)?,
                    parse_endpoint(end)?,
                    start_inc,
                    end_inc,
                ))
            }
            // Singleton shorthand, e.g. "[3]".
            None if start_inc && end_inc => {
                let value: Extended<T> = parse_endpoint(body)?;
                Ok(Range::bounded(value.clone(), value, true, true))
            }
            None => Err(ParseRangeError::Separator),
        }
    }
}

fn parse_endpoint<T: FromStr>(token: &str) -> Result<Extended<T>, ParseRangeError> {
    let token = token.trim();
    token
        .parse()
        .map_err(|_| ParseRangeError::Value(token.to_string()))
}

#[cfg(feature = "serde1")]
impl<T> Serialize for Range<T>
where
    T: Ord + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ((&self.start, self.start_inc), (&self.end, self.end_inc)).serialize(serializer)
    }
}

#[cfg(feature = "serde1")]
impl<'de, T> Deserialize<'de> for Range<T>
where
    T: Ord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ((start, start_inc), (end, end_inc)): ((Extended<T>, bool), (Extended<T>, bool)) =
            Deserialize::deserialize(deserializer)?;
        // Re-normalize rather than trusting the wire form.
        Ok(Range::bounded(start, end, start_inc, end_inc))
    }
}

impl<T: Ord + Clone> BitOr for &Range<T> {
    type Output = RangeSet<T>;

    fn bitor(self, rhs: Self) -> RangeSet<T> {
        self.union(rhs)
    }
}

impl<T: Ord + Clone> BitAnd for &Range<T> {
    type Output = Range<T>;

    fn bitand(self, rhs: Self) -> Range<T> {
        self.intersection(rhs)
    }
}

impl<T: Ord + Clone> BitXor for &Range<T> {
    type Output = RangeSet<T>;

    fn bitxor(self, rhs: Self) -> RangeSet<T> {
        self.symmetric_difference(rhs)
    }
}

impl<T: Ord + Clone> Sub for &Range<T> {
    type Output = RangeSet<T>;

    fn sub(self, rhs: Self) -> RangeSet<T> {
        self.difference(rhs)
    }
}

impl<T: Ord + Clone> Not for &Range<T> {
    type Output = RangeSet<T>;

    fn not(self) -> RangeSet<T> {
        self.complement()
    }
}

// Mixed range/set operands.

impl<T: Ord + Clone> BitOr<&RangeSet<T>> for &Range<T> {
    type Output = RangeSet<T>;

    fn bitor(self, rhs: &RangeSet<T>) -> RangeSet<T> {
        RangeSet::from(self.clone()).union(rhs)
    }
}

impl<T: Ord + Clone> BitAnd<&RangeSet<T>> for &Range<T> {
    type Output = RangeSet<T>;

    fn bitand(self, rhs: &RangeSet<T>) -> RangeSet<T> {
        RangeSet::from(self.clone()).intersection(rhs)
    }
}

impl<T: Ord + Clone> BitXor<&RangeSet<T>> for &Range<T> {
    type Output = RangeSet<T>;

    fn bitxor(self, rhs: &RangeSet<T>) -> RangeSet<T> {
        RangeSet::from(self.clone()).symmetric_difference(rhs)
    }
}

impl<T: Ord + Clone> Sub<&RangeSet<T>> for &Range<T> {
    type Output = RangeSet<T>;

    fn sub(self, rhs: &RangeSet<T>) -> RangeSet<T> {
        RangeSet::from(self.clone()).difference(rhs)
    }
}
