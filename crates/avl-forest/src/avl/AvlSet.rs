use std::fmt;

use crate::error::TreeError;
use crate::types::default_comparator;

use super::avl_map::AvlMap;

/// AVL tree set backed by [`AvlMap<V, ()>`].
pub struct AvlSet<V, C = fn(&V, &V) -> i32>
where
    C: Fn(&V, &V) -> i32,
{
    inner: AvlMap<V, (), C>,
}

impl<V> AvlSet<V, fn(&V, &V) -> i32>
where
    V: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<V>)
    }
}

impl<V> Default for AvlSet<V, fn(&V, &V) -> i32>
where
    V: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> AvlSet<V, C>
where
    C: Fn(&V, &V) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: AvlMap::with_comparator(comparator),
        }
    }

    /// Adds `value`; returns `false` if it was already present.
    pub fn add(&mut self, value: V) -> bool {
        self.inner.insert(value, ()).is_none()
    }

    /// Removes `value`; returns `false` if it was not present.
    pub fn remove(&mut self, value: &V) -> bool {
        self.inner.remove(value).is_some()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.inner.contains_key(value)
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn height(&self) -> usize {
        self.inner.height()
    }

    pub fn first(&self) -> Option<&V> {
        self.inner.first().map(|i| self.inner.key(i))
    }

    pub fn last(&self) -> Option<&V> {
        self.inner.last().map(|i| self.inner.key(i))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.inner.keys()
    }

    pub fn assert_valid(&self) -> Result<(), TreeError> {
        self.inner.assert_valid()
    }
}

impl<V> FromIterator<V> for AvlSet<V, fn(&V, &V) -> i32>
where
    V: PartialOrd,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = Self::new();
        for v in iter {
            set.add(v);
        }
        set
    }
}

impl<V, C> fmt::Debug for AvlSet<V, C>
where
    V: fmt::Debug,
    C: Fn(&V, &V) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
