/*!
An algebra of one-dimensional continuous intervals over any totally-ordered
domain.

[`Range`] is a single contiguous interval whose start and end are
independently inclusive or exclusive, over a domain extended with `±∞`
([`Extended`]). [`RangeSet`] holds any number of them in canonical form —
sorted, disjoint, with touching ranges coalesced — and implements the
set-theoretic operators by merging the operands' sorted members in one pass.
[`RangeDict`] maps disjoint ranges to values with logarithmic-time lookup of
the entry containing a key, and [`Piecewise`] turns that lookup into function
dispatch.


# Which domain types work?

Any `T: Ord + Clone`. The algebra never assumes the domain is discrete: it
never computes a successor, so `[0, 1)` and `(1, 2)` stay distinct from
`[0, 2)` even over the integers. If `T` also subtracts into a magnitude type,
ranges and sets report a [`measure`](Range::measure); nothing else is asked
of the domain.


# Example

```rust
use range_algebra::{Range, RangeSet};

// Bracket notation parses into ranges; `..`-style std ranges convert too.
let weekdays: Range<u32> = "[1, 6)".parse()?;
assert_eq!(weekdays, (1..6).into());

// Set operators keep results canonical.
let s: RangeSet<u32> = [Range::new(1, 6), Range::new(6, 8)].into_iter().collect();
assert_eq!(s.to_string(), "{[1, 8)}");

let worked = s.difference(&Range::new(3, 4).into());
assert_eq!(worked.to_string(), "{[1, 3), [4, 8)}");
# Ok::<(), range_algebra::ParseRangeError>(())
```

Mapping ranges of scores to grades:

```rust
use range_algebra::RangeDict;

let grades = RangeDict::from_entries([
    ("[90, 100]".parse().unwrap(), 'A'),
    ("[80, 90)".parse().unwrap(), 'B'),
    ("[0, 80)".parse().unwrap(), 'F'),
])
.unwrap();

assert_eq!(grades.get(&85), Ok(&'B'));
assert_eq!(grades.get(&90), Ok(&'A'));
```


# Failure policy

Construction is permissive: a range whose bounds are reversed (or that
excludes its only point) normalizes to the empty range, which is a valid
zero element of the algebra. What *is* checked fails loudly and eagerly:
parsing malformed bracket notation ([`ParseRangeError`]), inserting an
overlapping or empty key into a [`RangeDict`] ([`ConflictError`]), and
looking up a key no range contains ([`KeyNotFoundError`]). Operating on
incomparable domains is not expressible — the type parameter's `Ord` bound
discharges that error class at compile time.


## Crate features

By default this crate has no runtime dependencies beyond `num-traits` and
`thiserror`.

If you enable the **serde1** feature it will introduce a dependency on the
_serde_ crate and provide `Serialize` and `Deserialize` implementations for
[`Range`], [`RangeSet`], [`RangeDict`] and [`Extended`]. Deserialization
re-normalizes sets and re-checks dict disjointness rather than trusting the
wire form.
*/

pub mod dict;
pub mod extended;
pub mod piecewise;
pub mod range;
pub mod set;

mod error;
pub(crate) mod operations;

#[cfg(test)]
mod naive;

pub use dict::RangeDict;
pub use error::{ConflictError, KeyNotFoundError, ParseRangeError};
pub use extended::Extended;
pub use piecewise::Piecewise;
pub use range::Range;
pub use set::RangeSet;
