#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use range_algebra::{Extended, Range, RangeSet};

#[derive(Clone, Copy, Debug, Arbitrary)]
enum Bound {
    NegInf,
    Finite(i8),
    PosInf,
}

impl From<Bound> for Extended<i8> {
    fn from(bound: Bound) -> Self {
        match bound {
            Bound::NegInf => Extended::NegInf,
            Bound::Finite(v) => Extended::Finite(v),
            Bound::PosInf => Extended::PosInf,
        }
    }
}

#[derive(Clone, Copy, Debug, Arbitrary)]
struct RawRange {
    start: Bound,
    end: Bound,
    start_inc: bool,
    end_inc: bool,
}

impl From<RawRange> for Range<i8> {
    fn from(raw: RawRange) -> Self {
        Range::bounded(raw.start.into(), raw.end.into(), raw.start_inc, raw.end_inc)
    }
}

fuzz_target!(|input: (Vec<RawRange>, Vec<RawRange>)| {
    let (raw_a, raw_b) = input;
    let a_members: Vec<Range<i8>> = raw_a.into_iter().map(Range::from).collect();
    let b_members: Vec<Range<i8>> = raw_b.into_iter().map(Range::from).collect();
    let a = RangeSet::from_ranges(a_members.clone());
    let b = RangeSet::from_ranges(b_members.clone());

    let union = a.union(&b);
    let intersection = a.intersection(&b);
    let difference = a.difference(&b);
    let xor = a.symmetric_difference(&b);

    // Pointwise agreement with the defining truth tables.
    for probe in i8::MIN..=i8::MAX {
        let in_a = a_members.iter().any(|range| range.contains(&probe));
        let in_b = b_members.iter().any(|range| range.contains(&probe));
        assert_eq!(union.contains(&probe), in_a || in_b);
        assert_eq!(intersection.contains(&probe), in_a && in_b);
        assert_eq!(difference.contains(&probe), in_a && !in_b);
        assert_eq!(xor.contains(&probe), in_a != in_b);
    }

    // De Morgan, xor decomposition, self-cancellation, double complement.
    assert_eq!(
        union.complement(),
        a.complement().intersection(&b.complement())
    );
    assert_eq!(xor, union.difference(&intersection));
    assert!(a.symmetric_difference(&a).is_empty());
    assert_eq!(a.complement().complement(), a);
});
