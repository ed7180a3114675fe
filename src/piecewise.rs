use crate::dict::RangeDict;
use crate::error::{ConflictError, KeyNotFoundError};
use crate::range::Range;

/// A piecewise-defined function: a [`RangeDict`] of callables, evaluated by
/// dispatching on the range containing the argument.
///
/// `eval` fails with [`KeyNotFoundError`] when the argument falls outside
/// every piece; whatever the selected callable returns (or panics) propagates
/// unchanged.
///
/// All pieces share one callable type `F`. Plain `fn` pointers work when the
/// pieces are simple; use `Box<dyn Fn(K) -> R>` to mix distinct closures.
///
/// ```
/// use range_algebra::Piecewise;
///
/// let f = Piecewise::from_entries([
///     ("(-inf, 4)".parse().unwrap(), (|x| 2 * x) as fn(i32) -> i32),
///     ("[4, inf)".parse().unwrap(), |x| 2 + x),
/// ])
/// .unwrap();
///
/// assert_eq!(f.eval(3), Ok(6));
/// assert_eq!(f.eval(4), Ok(6));
/// assert_eq!(f.eval(10), Ok(12));
/// ```
#[derive(Clone, Debug)]
pub struct Piecewise<K, F> {
    pieces: RangeDict<K, F>,
}

impl<K: Ord + Clone, F> Piecewise<K, F> {
    /// Makes a new `Piecewise` with no pieces; it rejects every argument
    /// until pieces are added.
    pub fn new() -> Self {
        Piecewise {
            pieces: RangeDict::new(),
        }
    }

    /// Builds from `(range, callable)` pairs; overlapping pieces are
    /// rejected eagerly, exactly as in [`RangeDict::from_entries`].
    pub fn from_entries<I>(entries: I) -> Result<Self, ConflictError>
    where
        I: IntoIterator<Item = (Range<K>, F)>,
    {
        Ok(Piecewise {
            pieces: RangeDict::from_entries(entries)?,
        })
    }

    /// Registers a piece over `range`.
    pub fn insert(&mut self, range: Range<K>, f: F) -> Result<(), ConflictError> {
        self.pieces.insert(range, f)
    }

    /// Applies the piece whose range contains `key` to `key`.
    pub fn eval<R>(&self, key: K) -> Result<R, KeyNotFoundError>
    where
        F: Fn(K) -> R,
    {
        let f = self.pieces.get(&key)?;
        Ok(f(key))
    }

    /// The underlying dispatch table.
    pub fn pieces(&self) -> &RangeDict<K, F> {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl<K: Ord + Clone, F> Default for Piecewise<K, F> {
    fn default() -> Self {
        Piecewise::new()
    }
}
