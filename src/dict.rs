use std::fmt;

#[cfg(feature = "serde1")]
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, SeqAccess, Visitor},
    ser::{Serialize, SerializeSeq, Serializer},
};

use crate::error::{ConflictError, KeyNotFoundError};
use crate::range::Range;
use crate::set::RangeSet;

/// A map from a continuous key domain to values, keyed by disjoint ranges.
///
/// Entries are kept sorted by range, so looking up the entry whose range
/// contains a key is a bisection for the candidate plus one containment
/// check — O(log n). Unlike [`RangeSet`], nothing here coalesces: the ranges
/// are the identities of the entries, and an insert whose key overlaps an
/// existing entry is a usage error reported as [`ConflictError`], never
/// silently resolved.
///
/// ```
/// use range_algebra::{Range, RangeDict};
///
/// let grades = RangeDict::from_entries([
///     ("[90, 100]".parse().unwrap(), 'A'),
///     ("[80, 90)".parse().unwrap(), 'B'),
///     ("[70, 80)".parse().unwrap(), 'C'),
///     ("[60, 70)".parse().unwrap(), 'D'),
///     ("[0, 60)".parse().unwrap(), 'F'),
/// ])
/// .unwrap();
///
/// assert_eq!(grades.get(&85), Ok(&'B'));
/// assert_eq!(grades.get(&90), Ok(&'A'));
/// assert!(grades.get(&-1).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RangeDict<K, V> {
    entries: Vec<(Range<K>, V)>,
}

impl<K: Ord + Clone, V> RangeDict<K, V> {
    /// Makes a new empty `RangeDict`.
    pub fn new() -> Self {
        RangeDict {
            entries: Vec::new(),
        }
    }

    /// Builds a dict from entries, rejecting overlap eagerly: the first
    /// conflicting entry fails the whole construction.
    pub fn from_entries<I>(entries: I) -> Result<Self, ConflictError>
    where
        I: IntoIterator<Item = (Range<K>, V)>,
    {
        let mut dict = RangeDict::new();
        for (range, value) in entries {
            dict.insert(range, value)?;
        }
        Ok(dict)
    }

    /// Where `range` would be inserted, or why it can't be.
    fn insertion_point(&self, range: &Range<K>) -> Result<usize, ConflictError> {
        if range.is_empty() {
            return Err(ConflictError::EmptyRange);
        }
        let i = self.entries.partition_point(|(stored, _)| stored < range);
        // Entries are disjoint, so only the two neighbors can overlap.
        let conflicts = |index: usize| {
            self.entries
                .get(index)
                .is_some_and(|(stored, _)| stored.overlaps(range))
        };
        if conflicts(i) || (i > 0 && conflicts(i - 1)) {
            return Err(ConflictError::Overlap);
        }
        Ok(i)
    }

    /// Inserts an entry, keeping the entries sorted by range.
    pub fn insert(&mut self, range: Range<K>, value: V) -> Result<(), ConflictError> {
        let i = self.insertion_point(&range)?;
        self.entries.insert(i, (range, value));
        Ok(())
    }

    /// Inserts one entry per member range of `set`, each mapping to a clone
    /// of `value`. All-or-nothing: if any member conflicts, nothing is
    /// inserted.
    pub fn insert_set(&mut self, set: &RangeSet<K>, value: V) -> Result<(), ConflictError>
    where
        V: Clone,
    {
        // Members are mutually disjoint already, so pre-checking each against
        // the current entries decides the whole batch.
        for range in set.iter() {
            self.insertion_point(range)?;
        }
        for range in set.iter() {
            self.insert(range.clone(), value.clone())?;
        }
        Ok(())
    }

    /// Returns the value for the range containing `key`.
    pub fn get(&self, key: &K) -> Result<&V, KeyNotFoundError> {
        self.get_key_value(key)
            .map(|(_range, value)| value)
            .ok_or(KeyNotFoundError)
    }

    /// Returns the entry (as a pair of references) whose range contains
    /// `key`, if any: the candidate is the first entry not entirely below
    /// the key, found by bisection.
    pub fn get_key_value(&self, key: &K) -> Option<(&Range<K>, &V)> {
        let i = self
            .entries
            .partition_point(|(range, _)| range.lies_below(key));
        self.entries
            .get(i)
            .filter(|(range, _)| range.contains(key))
            .map(|(range, value)| (range, value))
    }

    /// Returns `true` if any entry's range contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Removes the entry keyed by exactly this range, returning its value.
    pub fn remove(&mut self, range: &Range<K>) -> Option<V> {
        let i = self
            .entries
            .binary_search_by(|(stored, _)| stored.cmp(range))
            .ok()?;
        Some(self.entries.remove(i).1)
    }

    /// Gets an iterator over all entries, ordered by range.
    pub fn iter(&self) -> impl Iterator<Item = (&Range<K>, &V)> {
        self.entries.iter().map(|(range, value)| (range, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Range<K>> {
        self.entries.iter().map(|(range, _)| range)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord + Clone, V> Default for RangeDict<K, V> {
    fn default() -> Self {
        RangeDict::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RangeDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(range, value)| (range, value)))
            .finish()
    }
}

impl<K: Ord + fmt::Display, V: fmt::Display> fmt::Display for RangeDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (range, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{range}: {value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(feature = "serde1")]
impl<K, V> Serialize for RangeDict<K, V>
where
    K: Ord + Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde1")]
impl<'de, K, V> Deserialize<'de> for RangeDict<K, V>
where
    K: Ord + Clone + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RangeDictVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

#[cfg(feature = "serde1")]
struct RangeDictVisitor<K, V> {
    marker: std::marker::PhantomData<fn() -> RangeDict<K, V>>,
}

#[cfg(feature = "serde1")]
impl<'de, K, V> Visitor<'de> for RangeDictVisitor<K, V>
where
    K: Ord + Clone + Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = RangeDict<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("RangeDict")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut dict = RangeDict::new();
        while let Some((range, value)) = access.next_element()? {
            dict.insert(range, value).map_err(DeError::custom)?;
        }
        Ok(dict)
    }
}
