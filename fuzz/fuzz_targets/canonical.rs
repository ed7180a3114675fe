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

fuzz_target!(|raw: Vec<RawRange>| {
    let members: Vec<Range<i8>> = raw.into_iter().map(Range::from).collect();

    let mut set = RangeSet::new();
    for range in members.clone() {
        set.insert(range);
    }

    // Canonical form must survive any insertion sequence.
    let collected: Vec<Range<i8>> = set.iter().cloned().collect();
    for member in &collected {
        assert!(!member.is_empty());
    }
    let mut peek = collected.iter().peekable();
    while let Some(range) = peek.next() {
        if let Some(next) = peek.peek() {
            if !(range < *next) || range.touches(next) {
                panic!("not canonical: {range:?} then {next:?}");
            }
        }
    }

    // And it must still describe exactly the inserted points.
    for probe in i8::MIN..=i8::MAX {
        let expected = members.iter().any(|range| range.contains(&probe));
        assert_eq!(set.contains(&probe), expected);
    }

    // Incremental and bulk construction agree.
    assert_eq!(set, RangeSet::from_ranges(members));
});
