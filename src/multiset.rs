use std::hash::Hash;

use indexmap::IndexMap;
use itertools::Itertools;

/// A counted collection: every element carries a multiplicity.
///
/// Iteration follows first-insertion order, which keeps algorithms that pick
/// "any" element reproducible. Equality is multiset equality and ignores
/// that order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: serde::Serialize + Eq + Hash",
        deserialize = "T: serde::Deserialize<'de> + Eq + Hash"
    ))
)]
pub struct Multiset<T> {
    counts: IndexMap<T, usize, ahash::RandomState>,
    len: usize,
}

impl<T: Eq + Hash> Multiset<T> {
    pub fn new() -> Self {
        Multiset {
            counts: IndexMap::default(),
            len: 0,
        }
    }

    /// Total number of elements, counted with multiplicity.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct elements.
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, item: &T) -> usize {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.counts.contains_key(item)
    }

    pub fn insert(&mut self, item: T) {
        self.insert_n(item, 1)
    }

    /// Adds `n` copies of `item`. Adding zero copies leaves no trace.
    pub fn insert_n(&mut self, item: T, n: usize) {
        if n == 0 {
            return;
        }
        *self.counts.entry(item).or_insert(0) += n;
        self.len += n;
    }

    /// Removes one copy of `item`, returning whether there was one.
    pub fn remove(&mut self, item: &T) -> bool {
        self.remove_n(item, 1) == 1
    }

    /// Removes up to `n` copies of `item` and returns how many were removed.
    pub fn remove_n(&mut self, item: &T, n: usize) -> usize {
        let Some(count) = self.counts.get_mut(item) else {
            return 0;
        };
        let removed = n.min(*count);
        *count -= removed;
        if *count == 0 {
            self.counts.shift_remove(item);
        }
        self.len -= removed;
        removed
    }

    /// Removes every copy of `item` and returns how many there were.
    pub fn remove_all(&mut self, item: &T) -> usize {
        match self.counts.shift_remove(item) {
            Some(count) => {
                self.len -= count;
                count
            }
            None => 0,
        }
    }

    /// Keeps only the elements for which `keep` holds, with all their copies.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.counts.retain(|item, _| keep(item));
        self.len = self.counts.values().sum();
    }

    /// Every element, repeated according to its multiplicity.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.counts
            .iter()
            .flat_map(|(item, &count)| itertools::repeat_n(item, count))
    }

    /// Distinct elements with their multiplicities.
    pub fn iter_counts(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.counts.iter().map(|(item, &count)| (item, count))
    }

    /// Distinct elements.
    pub fn elements(&self) -> impl Iterator<Item = &T> + '_ {
        self.counts.keys()
    }

    /// Applies `f` to every element, merging elements that become equal.
    pub fn map<U: Eq + Hash>(&self, mut f: impl FnMut(&T) -> U) -> Multiset<U> {
        let mut mapped = Multiset::new();
        for (item, count) in self.iter_counts() {
            mapped.insert_n(f(item), count);
        }
        mapped
    }
}

impl<T: Eq + Hash> Default for Multiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> PartialEq for Multiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.counts == other.counts
    }
}

impl<T: Eq + Hash> Eq for Multiset<T> {}

impl<T: Eq + Hash> FromIterator<T> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Multiset::new();
        set.extend(iter);
        set
    }
}

impl<T: Eq + Hash> Extend<T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Eq + Hash + std::fmt::Display> std::fmt::Display for Multiset<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = self
            .iter_counts()
            .map(|(item, count)| {
                if count == 1 {
                    item.to_string()
                } else {
                    format!("{item} x{count}")
                }
            })
            .join(", ");
        write!(f, "{{{body}}}")
    }
}
