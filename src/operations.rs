//! The shared merge engine behind the four boolean operations on canonical
//! range sequences.
//!
//! Both operands are flattened into their sorted endpoint sequences and swept
//! with one cursor each. At every boundary value the operator's truth table
//! is evaluated twice — for membership *at* the scanline and *immediately to
//! the right of* it — and the transitions between the two decide which output
//! endpoints to emit. One sweep therefore serves union, intersection,
//! difference and symmetric difference, runs in O(n + m), and emits canonical
//! output directly: adjacency across operands merges, while punctures and
//! isolated points survive as exclusive boundary pairs and singletons.

use crate::extended::Extended;
use crate::range::Range;

pub(crate) fn union<T: Ord + Clone>(a: &[Range<T>], b: &[Range<T>]) -> Vec<Range<T>> {
    merge(a, b, |a, b| a || b)
}

pub(crate) fn intersection<T: Ord + Clone>(a: &[Range<T>], b: &[Range<T>]) -> Vec<Range<T>> {
    merge(a, b, |a, b| a && b)
}

pub(crate) fn difference<T: Ord + Clone>(a: &[Range<T>], b: &[Range<T>]) -> Vec<Range<T>> {
    merge(a, b, |a, b| a && !b)
}

pub(crate) fn symmetric_difference<T: Ord + Clone>(
    a: &[Range<T>],
    b: &[Range<T>],
) -> Vec<Range<T>> {
    merge(a, b, |a, b| a != b)
}

/// Which side of an interval an endpoint delimits, and whether the endpoint
/// value itself is included.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Boundary {
    LeftClosed,
    LeftOpen,
    RightClosed,
    RightOpen,
}

struct Endpoint<'a, T> {
    value: &'a Extended<T>,
    boundary: Boundary,
}

impl<T: Ord> Endpoint<'_, T> {
    fn is_left(&self) -> bool {
        matches!(self.boundary, Boundary::LeftClosed | Boundary::LeftOpen)
    }

    fn is_closed(&self) -> bool {
        matches!(self.boundary, Boundary::LeftClosed | Boundary::RightClosed)
    }

    /// Whether the region delimited by this endpoint contains `value`.
    /// The endpoint most recently passed by the sweep encodes whether its
    /// stream is currently inside a range, so this is a complete membership
    /// test for one operand.
    fn contains(&self, value: &Extended<T>) -> bool {
        if self.value == value {
            return self.is_closed();
        }
        if self.is_left() {
            value > self.value
        } else {
            value < self.value
        }
    }

    /// Whether the region contains points immediately to the right of
    /// `value`, i.e. `value + ε` for every small ε.
    fn contains_right_of(&self, value: &Extended<T>) -> bool {
        if self.is_left() {
            value >= self.value
        } else {
            value < self.value
        }
    }
}

fn endpoints<T: Ord>(ranges: &[Range<T>]) -> Vec<Endpoint<'_, T>> {
    let mut out = Vec::with_capacity(ranges.len() * 2);
    for range in ranges {
        out.push(Endpoint {
            value: range.start(),
            boundary: if range.start_inclusive() {
                Boundary::LeftClosed
            } else {
                Boundary::LeftOpen
            },
        });
        out.push(Endpoint {
            value: range.end(),
            boundary: if range.end_inclusive() {
                Boundary::RightClosed
            } else {
                Boundary::RightOpen
            },
        });
    }
    out
}

fn contains_at<T: Ord>(current: Option<&Endpoint<'_, T>>, value: &Extended<T>) -> bool {
    current.is_some_and(|endpoint| endpoint.contains(value))
}

fn contains_right_of<T: Ord>(current: Option<&Endpoint<'_, T>>, value: &Extended<T>) -> bool {
    current.is_some_and(|endpoint| endpoint.contains_right_of(value))
}

fn merge<T, F>(a: &[Range<T>], b: &[Range<T>], op: F) -> Vec<Range<T>>
where
    T: Ord + Clone,
    F: Fn(bool, bool) -> bool,
{
    let a = endpoints(a);
    let b = endpoints(b);
    let mut out: Vec<(Extended<T>, Boundary)> = Vec::new();

    let (mut i, mut j) = (0, 0);
    // Last endpoint the sweep passed on each side; `None` before the first.
    let mut current_a: Option<&Endpoint<'_, T>> = None;
    let mut current_b: Option<&Endpoint<'_, T>> = None;
    let mut inside = false;

    while i < a.len() || j < b.len() {
        let scanline: &Extended<T> = if i >= a.len() {
            current_b = Some(&b[j]);
            j += 1;
            b[j - 1].value
        } else if j >= b.len() {
            current_a = Some(&a[i]);
            i += 1;
            a[i - 1].value
        } else {
            // Advance whichever endpoint comes first; both on a tie.
            let scanline = (a[i].value).min(b[j].value);
            if a[i].value == scanline {
                current_a = Some(&a[i]);
                i += 1;
            }
            if b[j].value == scanline {
                current_b = Some(&b[j]);
                j += 1;
            }
            scanline
        };

        let at = op(
            contains_at(current_a, scanline),
            contains_at(current_b, scanline),
        );
        let right = op(
            contains_right_of(current_a, scanline),
            contains_right_of(current_b, scanline),
        );

        if inside {
            if !right {
                // The region ends here; closed iff the scanline itself is in.
                out.push((
                    scanline.clone(),
                    if at {
                        Boundary::RightClosed
                    } else {
                        Boundary::RightOpen
                    },
                ));
                inside = false;
            } else if !at {
                // Puncture: the region continues but excludes this one point.
                out.push((scanline.clone(), Boundary::RightOpen));
                out.push((scanline.clone(), Boundary::LeftOpen));
            }
        } else if right {
            out.push((
                scanline.clone(),
                if at {
                    Boundary::LeftClosed
                } else {
                    Boundary::LeftOpen
                },
            ));
            inside = true;
        } else if at {
            // Isolated point: in at the scanline, out on both sides.
            out.push((scanline.clone(), Boundary::LeftClosed));
            out.push((scanline.clone(), Boundary::RightClosed));
        }
    }

    let mut ranges = Vec::with_capacity(out.len() / 2);
    let mut emitted = out.into_iter();
    while let (Some((start, start_boundary)), Some((end, end_boundary))) =
        (emitted.next(), emitted.next())
    {
        ranges.push(Range::bounded(
            start,
            end,
            start_boundary == Boundary::LeftClosed,
            end_boundary == Boundary::RightClosed,
        ));
    }
    ranges
}
