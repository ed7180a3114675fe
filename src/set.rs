use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not, Sub};
use std::str::FromStr;

use num_traits::Zero;

#[cfg(feature = "serde1")]
use serde::{
    de::{Deserialize, Deserializer, SeqAccess, Visitor},
    ser::{Serialize, SerializeSeq, Serializer},
};

use crate::error::ParseRangeError;
use crate::extended::Extended;
use crate::operations;
use crate::range::Range;

/// A set of values represented as a canonical sequence of disjoint ranges.
///
/// The canonical-form invariant holds after every constructor and operation:
/// the member ranges are non-empty, sorted ascending, pairwise disjoint, and
/// no two consecutive members could be merged into one (ranges separated only
/// by a touching inclusive/exclusive boundary coalesce). Two `RangeSet`s are
/// therefore equal exactly when they contain the same points.
///
/// The boolean operations walk both operands' sorted members with one cursor
/// each, so they cost O(n + m) rather than O(n · m).
///
/// ```
/// use range_algebra::{Range, RangeSet};
///
/// let set: RangeSet<i32> = [Range::new(5, 6), Range::new(0, 2), Range::new(2, 3)]
///     .into_iter()
///     .collect();
/// // [0, 2) and [2, 3) merged.
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&2));
/// assert!(!set.contains(&4));
///
/// let carved = set.difference(&Range::new(1, 3).into());
/// assert_eq!(carved.to_string(), "{[0, 1), [5, 6)}");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RangeSet<T> {
    ranges: Vec<Range<T>>,
}

impl<T: Ord + Clone> RangeSet<T> {
    /// Makes a new empty `RangeSet`.
    pub fn new() -> Self {
        RangeSet { ranges: Vec::new() }
    }

    /// Builds a set from arbitrary ranges: empties are dropped, the rest are
    /// sorted if they need it, and one sweep merges everything that touches.
    pub fn from_ranges(ranges: Vec<Range<T>>) -> Self {
        let mut ranges = ranges;
        ranges.retain(|range| !range.is_empty());
        if !ranges.windows(2).all(|pair| pair[0] <= pair[1]) {
            ranges.sort();
        }
        let mut canonical: Vec<Range<T>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            if let Some(last) = canonical.last_mut() {
                if last.touches(&range) {
                    let merged = last.hull(&range);
                    *last = merged;
                    continue;
                }
            }
            canonical.push(range);
        }
        RangeSet { ranges: canonical }
    }

    /// Wraps output of the merge engine, which is canonical by construction.
    fn from_canonical(ranges: Vec<Range<T>>) -> Self {
        RangeSet { ranges }
    }

    /// Inserts a range, merging it with every stored range it touches.
    ///
    /// This is the one in-place mutator of the set; everything else returns
    /// fresh sets.
    pub fn insert(&mut self, range: Range<T>) {
        if range.is_empty() {
            return;
        }
        let lo = self
            .ranges
            .partition_point(|stored| *stored < range && !stored.touches(&range));
        let hi = lo
            + self.ranges[lo..]
                .partition_point(|stored| stored.touches(&range));
        let merged = self.ranges[lo..hi]
            .iter()
            .fold(range, |acc, stored| acc.hull(stored));
        self.ranges.splice(lo..hi, std::iter::once(merged));
    }

    /// Returns the member range covering `value`, if any.
    pub fn get(&self, value: &T) -> Option<&Range<T>> {
        let i = self
            .ranges
            .partition_point(|range| range.lies_below(value));
        self.ranges.get(i).filter(|range| range.contains(value))
    }

    /// Returns `true` if any member range covers `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns `true` if `range` is entirely covered by one member range
    /// (any contiguous subset of the set is, by canonicity).
    pub fn contains_range(&self, range: &Range<T>) -> bool {
        if range.is_empty() {
            return true;
        }
        let i = self
            .ranges
            .partition_point(|stored| stored.lower_cmp(range) != Ordering::Greater);
        i > 0 && self.ranges[i - 1].covers(range)
    }

    /// Gets an iterator over the member ranges in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Range<T>> {
        self.ranges.iter()
    }

    /// The number of disjoint member ranges (not points).
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn union(&self, other: &RangeSet<T>) -> RangeSet<T> {
        RangeSet::from_canonical(operations::union(&self.ranges, &other.ranges))
    }

    pub fn intersection(&self, other: &RangeSet<T>) -> RangeSet<T> {
        RangeSet::from_canonical(operations::intersection(&self.ranges, &other.ranges))
    }

    /// Points of `self` not in `other`; a single member may be split into
    /// several output ranges as members of `other` carve out its middle.
    pub fn difference(&self, other: &RangeSet<T>) -> RangeSet<T> {
        RangeSet::from_canonical(operations::difference(&self.ranges, &other.ranges))
    }

    pub fn symmetric_difference(&self, other: &RangeSet<T>) -> RangeSet<T> {
        RangeSet::from_canonical(operations::symmetric_difference(
            &self.ranges,
            &other.ranges,
        ))
    }

    /// Complement within the full domain: one pass over the members emits
    /// every gap between consecutive ranges (and towards `±∞`), flipping
    /// inclusivity at each cut bound.
    pub fn complement(&self) -> RangeSet<T> {
        let mut gaps = Vec::with_capacity(self.ranges.len() + 1);
        let mut cursor = (Extended::NegInf, false);
        for range in &self.ranges {
            let (start, start_inc) = cursor;
            let gap = Range::bounded(
                start,
                range.start().clone(),
                start_inc,
                !range.start_inclusive(),
            );
            if !gap.is_empty() {
                gaps.push(gap);
            }
            cursor = (range.end().clone(), !range.end_inclusive());
        }
        let (start, start_inc) = cursor;
        let tail = Range::bounded(start, Extended::PosInf, start_inc, false);
        if !tail.is_empty() {
            gaps.push(tail);
        }
        RangeSet::from_canonical(gaps)
    }

    /// The maximal uncovered ranges within `outer`: the complement restricted
    /// to a caller-supplied universe.
    pub fn gaps(&self, outer: &Range<T>) -> RangeSet<T> {
        self.complement().intersection(&RangeSet::from(outer.clone()))
    }

    /// Total measure of the member ranges; `∞` as soon as one is unbounded.
    pub fn measure<M>(&self) -> Extended<M>
    where
        T: Sub<Output = M>,
        M: Zero,
    {
        self.ranges
            .iter()
            .fold(Extended::Finite(M::zero()), |acc, range| {
                acc + range.measure()
            })
    }

    /// The set with every endpoint transformed by `f`, which must be
    /// order-preserving. The result is re-normalized.
    pub fn map<U, F>(&self, f: F) -> RangeSet<U>
    where
        U: Ord + Clone,
        F: Fn(&T) -> U,
    {
        RangeSet::from_ranges(self.ranges.iter().map(|range| range.map(&f)).collect())
    }
}

impl<T: Ord + Clone> Default for RangeSet<T> {
    fn default() -> Self {
        RangeSet::new()
    }
}

impl<T: Ord + Clone> From<Range<T>> for RangeSet<T> {
    fn from(range: Range<T>) -> Self {
        RangeSet::from_ranges(vec![range])
    }
}

impl<T: Ord + Clone> FromIterator<Range<T>> for RangeSet<T> {
    fn from_iter<I: IntoIterator<Item = Range<T>>>(iter: I) -> Self {
        RangeSet::from_ranges(iter.into_iter().collect())
    }
}

impl<T: Ord + Clone> Extend<Range<T>> for RangeSet<T> {
    fn extend<I: IntoIterator<Item = Range<T>>>(&mut self, iter: I) {
        for range in iter {
            self.insert(range);
        }
    }
}

impl<T> IntoIterator for RangeSet<T> {
    type Item = Range<T>;
    type IntoIter = std::vec::IntoIter<Range<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RangeSet<T> {
    type Item = &'a Range<T>;
    type IntoIter = std::slice::Iter<'a, Range<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

// Avoid exposing the inner Vec through a derived impl; render like the
// underlying set types do.
impl<T: fmt::Debug> fmt::Debug for RangeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ranges.iter()).finish()
    }
}

impl<T: Ord + fmt::Display> fmt::Display for RangeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ranges.is_empty() {
            return f.write_str("{∅}");
        }
        f.write_str("{")?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{range}")?;
        }
        f.write_str("}")
    }
}

/// Set notation: `{}` or `{∅}` for the empty set, otherwise comma-separated
/// bracket ranges, e.g. `{(-inf, 1], [2, 3)}`. Singleton members may be
/// written `[v]`.
impl<T: Ord + Clone + FromStr> FromStr for RangeSet<T> {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let body = s
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or(ParseRangeError::Brackets)?
            .trim();
        if body.is_empty() || body == "∅" {
            return Ok(RangeSet::new());
        }
        let mut ranges = Vec::new();
        let mut rest = body;
        loop {
            rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
            if rest.is_empty() {
                break;
            }
            // A chunk runs through the first closing bracket; commas inside
            // it separate the chunk's endpoints, not set members.
            let close = rest.find([']', ')']).ok_or(ParseRangeError::Brackets)?;
            let (chunk, tail) = rest.split_at(close + 1);
            ranges.push(chunk.parse()?);
            rest = tail;
        }
        Ok(RangeSet::from_ranges(ranges))
    }
}

#[cfg(feature = "serde1")]
impl<T> Serialize for RangeSet<T>
where
    T: Ord + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.ranges.len()))?;
        for range in &self.ranges {
            seq.serialize_element(range)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde1")]
impl<'de, T> Deserialize<'de> for RangeSet<T>
where
    T: Ord + Clone + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RangeSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

#[cfg(feature = "serde1")]
struct RangeSetVisitor<T> {
    marker: std::marker::PhantomData<fn() -> RangeSet<T>>,
}

#[cfg(feature = "serde1")]
impl<'de, T> Visitor<'de> for RangeSetVisitor<T>
where
    T: Ord + Clone + Deserialize<'de>,
{
    type Value = RangeSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("RangeSet")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        // Re-normalize through `insert` rather than trusting the wire form.
        let mut set = RangeSet::new();
        while let Some(range) = access.next_element()? {
            set.insert(range);
        }
        Ok(set)
    }
}

impl<T: Ord + Clone> BitOr for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn bitor(self, rhs: Self) -> RangeSet<T> {
        self.union(rhs)
    }
}

impl<T: Ord + Clone> BitAnd for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn bitand(self, rhs: Self) -> RangeSet<T> {
        self.intersection(rhs)
    }
}

impl<T: Ord + Clone> BitXor for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn bitxor(self, rhs: Self) -> RangeSet<T> {
        self.symmetric_difference(rhs)
    }
}

impl<T: Ord + Clone> Sub for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn sub(self, rhs: Self) -> RangeSet<T> {
        self.difference(rhs)
    }
}

impl<T: Ord + Clone> Not for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn not(self) -> RangeSet<T> {
        self.complement()
    }
}

// Mixed set/range operands.

impl<T: Ord + Clone> BitOr<&Range<T>> for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn bitor(self, rhs: &Range<T>) -> RangeSet<T> {
        self.union(&RangeSet::from(rhs.clone()))
    }
}

impl<T: Ord + Clone> BitAnd<&Range<T>> for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn bitand(self, rhs: &Range<T>) -> RangeSet<T> {
        self.intersection(&RangeSet::from(rhs.clone()))
    }
}

impl<T: Ord + Clone> BitXor<&Range<T>> for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn bitxor(self, rhs: &Range<T>) -> RangeSet<T> {
        self.symmetric_difference(&RangeSet::from(rhs.clone()))
    }
}

impl<T: Ord + Clone> Sub<&Range<T>> for &RangeSet<T> {
    type Output = RangeSet<T>;

    fn sub(self, rhs: &Range<T>) -> RangeSet<T> {
        self.difference(&RangeSet::from(rhs.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naive;

    fn r(s: &str) -> Range<i32> {
        s.parse().unwrap()
    }

    fn set(s: &str) -> RangeSet<i32> {
        s.parse().unwrap()
    }

    fn to_vec(set: &RangeSet<i32>) -> Vec<Range<i32>> {
        set.iter().cloned().collect()
    }

    //
    // Normalization
    //

    #[test]
    fn empty_set_is_empty() {
        let set: RangeSet<i32> = RangeSet::new();
        assert_eq!(to_vec(&set), vec![]);
        assert!(set.is_empty());
    }

    #[test]
    fn construction_drops_empty_ranges() {
        let set = RangeSet::from_ranges(vec![Range::new(3, 3), Range::new(5, 0)]);
        assert!(set.is_empty());
    }

    #[test]
    fn construction_sorts_and_merges() {
        let set = RangeSet::from_ranges(vec![r("[5, 6)"), r("[2, 3)"), r("[0, 2)")]);
        assert_eq!(to_vec(&set), vec![r("[0, 3)"), r("[5, 6)")]);
        naive::assert_canonical(&set);
    }

    #[test]
    fn construction_merges_overlap_and_keeps_punctures() {
        let set = RangeSet::from_ranges(vec![r("[0, 2]"), r("[1, 4)"), r("(4, 6)")]);
        assert_eq!(to_vec(&set), vec![r("[0, 4)"), r("(4, 6)")]);
        naive::assert_canonical(&set);
    }

    //
    // Insertion
    //

    #[test]
    fn insert_into_empty_set() {
        let mut set: RangeSet<i32> = RangeSet::new();
        set.insert(r("[0, 5)"));
        assert_eq!(to_vec(&set), vec![r("[0, 5)")]);
    }

    #[test]
    fn insert_coalesces_adjacent_neighbors() {
        let mut set: RangeSet<i32> = RangeSet::new();
        set.insert(r("[0, 1)"));
        set.insert(r("[2, 3)"));
        set.insert(r("[1, 2)"));
        assert_eq!(to_vec(&set), vec![r("[0, 3)")]);
        naive::assert_canonical(&set);
    }

    #[test]
    fn insert_swallows_covered_members() {
        let mut set: RangeSet<i32> = RangeSet::new();
        set.insert(r("[1, 2)"));
        set.insert(r("[3, 4)"));
        set.insert(r("[6, 7)"));
        set.insert(r("[0, 5)"));
        assert_eq!(to_vec(&set), vec![r("[0, 5)"), r("[6, 7)")]);
        naive::assert_canonical(&set);
    }

    #[test]
    fn insert_keeps_disjoint_members_apart() {
        let mut set: RangeSet<i32> = RangeSet::new();
        set.insert(r("[4, 5)"));
        set.insert(r("[0, 1)"));
        set.insert(r("(2, 3]"));
        assert_eq!(to_vec(&set), vec![r("[0, 1)"), r("(2, 3]"), r("[4, 5)")]);
    }

    #[test]
    fn insert_empty_is_a_no_op() {
        let mut set: RangeSet<i32> = RangeSet::new();
        set.insert(Range::empty());
        assert!(set.is_empty());
    }

    //
    // Membership
    //

    #[test]
    fn contains_checks_the_right_member() {
        let set = set("{[0, 2), [4, 6]}");
        assert!(set.contains(&0));
        assert!(set.contains(&1));
        assert!(!set.contains(&2));
        assert!(!set.contains(&3));
        assert!(set.contains(&4));
        assert!(set.contains(&6));
        assert!(!set.contains(&7));
    }

    #[test]
    fn get_returns_the_covering_member() {
        let set = set("{[0, 2), [4, 6]}");
        assert_eq!(set.get(&1), Some(&r("[0, 2)")));
        assert_eq!(set.get(&2), None);
        assert_eq!(set.get(&6), Some(&r("[4, 6]")));
    }

    #[test]
    fn contains_range_is_coverage() {
        let set = set("{[0, 10), [20, 30)}");
        assert!(set.contains_range(&r("[2, 5]")));
        assert!(set.contains_range(&r("[0, 10)")));
        assert!(!set.contains_range(&r("[0, 10]")));
        assert!(!set.contains_range(&r("[5, 25)")));
        assert!(set.contains_range(&Range::empty()));
    }

    //
    // Boolean operations
    //

    #[test]
    fn union_of_disjoint_sets() {
        assert_eq!(set("{[0, 1]}").union(&set("{[2, 3]}")), set("{[0, 1], [2, 3]}"));
    }

    #[test]
    fn union_merges_overlap() {
        assert_eq!(set("{[0, 2]}").union(&set("{[1, 3]}")), set("{[0, 3]}"));
    }

    #[test]
    fn union_absorbs_singletons_and_fills_punctures() {
        assert_eq!(set("{[0, 2]}").union(&set("{[1]}")), set("{[0, 2]}"));
        assert_eq!(
            set("{[0, 1), (1, 2]}").union(&set("{[1]}")),
            set("{[0, 2]}")
        );
    }

    #[test]
    fn union_with_empty_is_identity() {
        let a = set("{[0, 2]}");
        assert_eq!(a.union(&RangeSet::new()), a);
        assert_eq!(RangeSet::new().union(&a), a);
    }

    #[test]
    fn union_of_unbounded_members() {
        assert_eq!(
            set("{(-inf, 0]}").union(&set("{[1, 2]}")),
            set("{(-inf, 0], [1, 2]}")
        );
    }

    #[test]
    fn intersection_of_disjoint_sets_is_empty() {
        assert!(set("{[0, 1]}").intersection(&set("{[2, 3]}")).is_empty());
        assert!(set("{(-inf, 0]}").intersection(&set("{[1, 2]}")).is_empty());
    }

    #[test]
    fn intersection_keeps_the_overlap() {
        assert_eq!(set("{[0, 2]}").intersection(&set("{[1, 3]}")), set("{[1, 2]}"));
        assert_eq!(set("{[0, 2]}").intersection(&set("{[1]}")), set("{[1]}"));
    }

    #[test]
    fn intersection_with_empty_is_empty() {
        assert!(set("{[0, 2]}").intersection(&RangeSet::new()).is_empty());
    }

    #[test]
    fn difference_of_disjoint_sets_is_identity() {
        let a = set("{[0, 1]}");
        assert_eq!(a.difference(&set("{[2, 3]}")), a);
        assert_eq!(a.difference(&RangeSet::new()), a);
    }

    #[test]
    fn difference_carves_the_middle() {
        // The central scenario: subtracting an interior range splits one
        // member into two.
        let carved = set("{[0, 10)}").difference(&set("{[3, 5)}"));
        assert_eq!(to_vec(&carved), vec![r("[0, 3)"), r("[5, 10)")]);
    }

    #[test]
    fn difference_punctures_at_a_singleton() {
        assert_eq!(
            set("{[0, 2]}").difference(&set("{[1]}")),
            set("{[0, 1), (1, 2]}")
        );
    }

    #[test]
    fn difference_of_touching_closed_ends() {
        assert_eq!(set("{[1, 2]}").difference(&set("{[2, 3]}")), set("{[1, 2)}"));
    }

    #[test]
    fn difference_recovers_a_missing_singleton() {
        assert_eq!(
            set("{[0, 2]}").difference(&set("{[0, 1), (1, 2]}")),
            set("{[1]}")
        );
    }

    #[test]
    fn symmetric_difference_cancels_shared_regions() {
        assert_eq!(
            set("{[0, 2]}").symmetric_difference(&set("{[1, 3]}")),
            set("{[0, 1), (2, 3]}")
        );
        assert!(set("{[0, 2]}").symmetric_difference(&set("{[0, 2]}")).is_empty());
    }

    #[test]
    fn complement_of_empty_is_full() {
        let all: RangeSet<i32> = RangeSet::new().complement();
        assert_eq!(to_vec(&all), vec![Range::full()]);
        assert!(all.complement().is_empty());
    }

    #[test]
    fn complement_emits_every_gap() {
        let outside = set("{[0, 1), [2, 3]}").complement();
        assert_eq!(
            to_vec(&outside),
            vec![r("(-inf, 0)"), r("[1, 2)"), r("(3, inf)")]
        );
        naive::assert_canonical(&outside);
    }

    #[test]
    fn complement_around_a_singleton() {
        let outside = set("{[1]}").complement();
        assert_eq!(to_vec(&outside), vec![r("(-inf, 1)"), r("(1, inf)")]);
    }

    #[test]
    fn double_complement_is_identity() {
        let a = set("{[0, 1), (2, 3]}");
        assert_eq!(a.complement().complement(), a);
    }

    #[test]
    fn gaps_restrict_to_the_outer_range() {
        let set = set("{[3, 4), [5, 6)}");
        let gaps = set.gaps(&r("[1, 8)"));
        assert_eq!(to_vec(&gaps), vec![r("[1, 3)"), r("[4, 5)"), r("[6, 8)")]);
    }

    #[test]
    fn two_sided_split_reassembles_the_full_domain() {
        // Range[:4] ∪ Range[4:], both half-open at the split point.
        let below: RangeSet<i32> = RangeSet::from(Range::from(..4));
        let above: RangeSet<i32> = RangeSet::from(Range::from(4..));
        let union = below.union(&above);
        assert_eq!(to_vec(&union), vec![Range::full()]);
    }

    #[test]
    fn de_morgan() {
        let a = set("{[0, 3), [5, 8]}");
        let b = set("{(2, 6)}");
        assert_eq!(
            a.union(&b).complement(),
            a.complement().intersection(&b.complement())
        );
        assert_eq!(
            a.intersection(&b).complement(),
            a.complement().union(&b.complement())
        );
    }

    #[test]
    fn xor_is_union_minus_intersection() {
        let a = set("{[0, 3), [5, 8]}");
        let b = set("{(2, 6), [7]}");
        assert_eq!(
            a.symmetric_difference(&b),
            a.union(&b).difference(&a.intersection(&b))
        );
    }

    //
    // Measure and map
    //

    #[test]
    fn measure_sums_members() {
        assert_eq!(set("{[0, 3), [5, 8]}").measure(), Extended::Finite(6));
        assert_eq!(RangeSet::<i32>::new().measure::<i32>(), Extended::Finite(0));
        assert_eq!(set("{(-inf, 0], [1, 2]}").measure::<i32>(), Extended::PosInf);
    }

    #[test]
    fn map_transforms_and_renormalizes() {
        let scaled = set("{[0, 1], [3, 4]}").map(|v| v * 2);
        assert_eq!(to_vec(&scaled), vec![r("[0, 2]"), r("[6, 8]")]);
        // A contracting map can make separate members touch; the images merge.
        let halved = set("{[0, 1), [2, 3)}").map(|v| (v + 1) / 2);
        assert_eq!(to_vec(&halved), vec![r("[0, 2)")]);
    }

    //
    // Rendering and parsing
    //

    #[test]
    fn debug_repr_looks_right() {
        let mut set: RangeSet<i32> = RangeSet::new();
        assert_eq!(format!("{set:?}"), "{}");
        set.insert(r("[2, 5)"));
        assert_eq!(format!("{set:?}"), "{[2, 5)}");
        set.insert(r("(7, 8]"));
        assert_eq!(format!("{set:?}"), "{[2, 5), (7, 8]}");
    }

    #[test]
    fn display_and_parse_round_trip() {
        assert_eq!(set("{}").to_string(), "{∅}");
        assert_eq!(set("{∅}").to_string(), "{∅}");
        assert_eq!(
            set("{(-inf, 1], [2, 3)}").to_string(),
            "{(-∞, 1], [2, 3)}"
        );
        assert_eq!(set("{ [0, 1) , [2]}"), set("{[0, 1), [2, 2]}"));
    }

    #[test]
    fn parse_normalizes_members() {
        assert_eq!(set("{[2, 3), [0, 1), [1, 2)}"), set("{[0, 3)}"));
    }

    #[test]
    fn parse_rejects_malformed_sets() {
        assert_eq!("[0, 1)".parse::<RangeSet<i32>>(), Err(ParseRangeError::Brackets));
        assert_eq!("{[0, 1}".parse::<RangeSet<i32>>(), Err(ParseRangeError::Brackets));
        assert!("{[a, 1)}".parse::<RangeSet<i32>>().is_err());
    }

    //
    // Operator sugar
    //

    #[test]
    fn operators_delegate_to_the_named_methods() {
        let a = set("{[0, 3)}");
        let b = set("{(1, 5]}");
        assert_eq!(&a | &b, a.union(&b));
        assert_eq!(&a & &b, a.intersection(&b));
        assert_eq!(&a ^ &b, a.symmetric_difference(&b));
        assert_eq!(&a - &b, a.difference(&b));
        assert_eq!(!&a, a.complement());
    }

    #[test]
    fn mixed_operands_promote_the_range() {
        let a = set("{[0, 3), [5, 8)}");
        let range = r("[2, 6)");
        assert_eq!(&a | &range, set("{[0, 8)}"));
        assert_eq!(&a & &range, set("{[2, 3), [5, 6)}"));
        assert_eq!(&a - &range, set("{[0, 2), [6, 8)}"));
        assert_eq!(&range - &a, set("{[3, 5)}"));
        assert_eq!(&range ^ &a, set("{[0, 2), [3, 5), [6, 8)}"));
    }

    //
    // Cross-checks against the brute-force model
    //

    #[test]
    fn boolean_ops_agree_with_the_model_on_a_fixed_grid() {
        let a = vec![r("[0, 4)"), r("(6, 10]"), r("[12]"), r("(-inf, -6)")];
        let b = vec![r("[2, 7)"), r("(10, 12)"), r("[-8, -4]")];
        naive::check_ops(&a, &b);
    }

    #[test]
    fn boolean_ops_agree_with_the_model_on_touching_bounds() {
        let a = vec![r("[0, 2)"), r("[2, 4]"), r("(4, 6)")];
        let b = vec![r("(0, 2]"), r("[4]"), r("[6, 8)")];
        naive::check_ops(&a, &b);
    }

    proptest::proptest! {
        #[test]
        fn canonical_after_every_operation(
            a in naive::arb_ranges(),
            b in naive::arb_ranges(),
        ) {
            let sa = RangeSet::from_ranges(a.clone());
            let sb = RangeSet::from_ranges(b.clone());
            naive::assert_canonical(&sa);
            naive::assert_canonical(&sa.union(&sb));
            naive::assert_canonical(&sa.intersection(&sb));
            naive::assert_canonical(&sa.difference(&sb));
            naive::assert_canonical(&sa.symmetric_difference(&sb));
            naive::assert_canonical(&sa.complement());
        }

        #[test]
        fn ops_agree_with_the_model(
            a in naive::arb_ranges(),
            b in naive::arb_ranges(),
        ) {
            naive::check_ops(&a, &b);
        }

        #[test]
        fn algebraic_identities(
            a in naive::arb_ranges(),
            b in naive::arb_ranges(),
            c in naive::arb_ranges(),
        ) {
            let sa = RangeSet::from_ranges(a);
            let sb = RangeSet::from_ranges(b);
            let sc = RangeSet::from_ranges(c);
            // Commutativity and associativity.
            proptest::prop_assert_eq!(sa.union(&sb), sb.union(&sa));
            proptest::prop_assert_eq!(sa.intersection(&sb), sb.intersection(&sa));
            proptest::prop_assert_eq!(
                sa.union(&sb).union(&sc),
                sa.union(&sb.union(&sc))
            );
            proptest::prop_assert_eq!(
                sa.intersection(&sb).intersection(&sc),
                sa.intersection(&sb.intersection(&sc))
            );
            // De Morgan.
            proptest::prop_assert_eq!(
                sa.union(&sb).complement(),
                sa.complement().intersection(&sb.complement())
            );
            // Xor as union minus intersection, and self-cancellation.
            proptest::prop_assert_eq!(
                sa.symmetric_difference(&sb),
                sa.union(&sb).difference(&sa.intersection(&sb))
            );
            proptest::prop_assert!(sa.symmetric_difference(&sa).is_empty());
            // Double complement.
            proptest::prop_assert_eq!(sa.complement().complement(), sa);
        }

        #[test]
        fn insert_matches_bulk_construction(
            ranges in naive::arb_ranges(),
        ) {
            let mut incremental: RangeSet<i32> = RangeSet::new();
            for range in ranges.clone() {
                incremental.insert(range);
            }
            proptest::prop_assert_eq!(incremental, RangeSet::from_ranges(ranges));
        }
    }
}
