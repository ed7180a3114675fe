//! A simple but infeasibly slow model of the range algebra, for testing.
//!
//! Membership of a point in a collection of ranges is obviously correct to
//! compute by linear scan, so the clever implementations are checked against
//! it over a grid of probe points. Generated ranges use even endpoints and
//! the probes include odd values, so every open-interval interior and every
//! boundary is exercised.

use proptest::prelude::*;

use crate::extended::Extended;
use crate::range::Range;
use crate::set::RangeSet;

const PROBE_LIMIT: i32 = 25;

/// Membership by linear scan over arbitrary (non-canonical) ranges.
pub fn contains(ranges: &[Range<i32>], value: i32) -> bool {
    ranges.iter().any(|range| range.contains(&value))
}

/// Asserts the canonical-form invariant: non-empty members, sorted,
/// pairwise disjoint, no two consecutive members mergeable.
pub fn assert_canonical(set: &RangeSet<i32>) {
    let members: Vec<&Range<i32>> = set.iter().collect();
    for member in &members {
        assert!(!member.is_empty(), "canonical set holds empty member");
    }
    for pair in members.windows(2) {
        assert!(pair[0] < pair[1], "members out of order: {pair:?}");
        assert!(
            !pair[0].touches(pair[1]),
            "consecutive members should have been merged: {pair:?}"
        );
    }
}

/// Checks every boolean operation (and complement) against the model at
/// every probe point.
pub fn check_ops(a: &[Range<i32>], b: &[Range<i32>]) {
    let sa = RangeSet::from_ranges(a.to_vec());
    let sb = RangeSet::from_ranges(b.to_vec());

    let union = sa.union(&sb);
    let intersection = sa.intersection(&sb);
    let difference = sa.difference(&sb);
    let xor = sa.symmetric_difference(&sb);
    let complement = sa.complement();

    for result in [&union, &intersection, &difference, &xor, &complement] {
        assert_canonical(result);
    }

    for probe in -PROBE_LIMIT..=PROBE_LIMIT {
        let in_a = contains(a, probe);
        let in_b = contains(b, probe);
        assert_eq!(union.contains(&probe), in_a || in_b, "union at {probe}");
        assert_eq!(
            intersection.contains(&probe),
            in_a && in_b,
            "intersection at {probe}"
        );
        assert_eq!(
            difference.contains(&probe),
            in_a && !in_b,
            "difference at {probe}"
        );
        assert_eq!(xor.contains(&probe), in_a != in_b, "xor at {probe}");
        assert_eq!(complement.contains(&probe), !in_a, "complement at {probe}");
    }
}

fn arb_bound() -> impl Strategy<Value = Extended<i32>> {
    prop_oneof![
        1 => Just(Extended::NegInf),
        8 => (-10i32..=10).prop_map(|v| Extended::Finite(v * 2)),
        1 => Just(Extended::PosInf),
    ]
}

fn arb_range() -> impl Strategy<Value = Range<i32>> {
    (arb_bound(), arb_bound(), any::<bool>(), any::<bool>())
        .prop_map(|(start, end, start_inc, end_inc)| Range::bounded(start, end, start_inc, end_inc))
}

/// Small collections of ranges with even endpoints; roughly half the
/// generated bound pairs are reversed and normalize to empty, which is fine.
pub fn arb_ranges() -> impl Strategy<Value = Vec<Range<i32>>> {
    proptest::collection::vec(arb_range(), 0..8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_membership_matches_range_membership() {
        let ranges: Vec<Range<i32>> = vec!["[0, 2)".parse().unwrap(), "(4, 6]".parse().unwrap()];
        assert!(contains(&ranges, 0));
        assert!(!contains(&ranges, 2));
        assert!(!contains(&ranges, 4));
        assert!(contains(&ranges, 6));
    }
}
