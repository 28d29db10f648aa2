use std::fmt;

use crate::error::TreeError;
use crate::types::{default_comparator, KvNode};
use crate::util::{find, find_or_next_lower, first, height, last, next, prev, relocate, size};

use super::types::AvlNode;
use super::util::{self, Placement};

/// Ordered map backed by an arena-allocated AVL tree.
///
/// Entries are addressed by `u32` arena indices. Indices stay valid across
/// inserts; a removal frees one arena slot by moving the last node into it,
/// so indices obtained before a `remove` must not be reused after it.
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    comparator: C,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            comparator,
        }
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn arena(&self) -> &[AvlNode<K, V>] {
        &self.arena
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    fn push_node(&mut self, key: K, value: V) -> u32 {
        self.arena.push(AvlNode::new(key, value));
        (self.arena.len() - 1) as u32
    }

    /// Inserts `value` under `key`.
    ///
    /// An existing key keeps its node and only has its value replaced; the
    /// previous value is returned in that case.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match util::locate(&self.arena, self.root, &key, &self.comparator) {
            Placement::Found(idx) => {
                tracing::trace!(target: "avl_forest::map", node = idx, "overwrote value");
                Some(self.arena[idx as usize].set_value(value))
            }
            Placement::Root => {
                let idx = self.push_node(key, value);
                self.root = Some(idx);
                None
            }
            Placement::Left(parent) => {
                let idx = self.push_node(key, value);
                self.root = util::insert_left(&mut self.arena, self.root, idx, parent);
                tracing::trace!(
                    target: "avl_forest::map",
                    node = idx,
                    parent_node = parent,
                    "inserted left"
                );
                None
            }
            Placement::Right(parent) => {
                let idx = self.push_node(key, value);
                self.root = util::insert_right(&mut self.arena, self.root, idx, parent);
                tracing::trace!(
                    target: "avl_forest::map",
                    node = idx,
                    parent_node = parent,
                    "inserted right"
                );
                None
            }
        }
    }

    /// Removes `key`, returning its value. Absent keys leave the map untouched.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.find(key)?;
        self.root = util::remove(&mut self.arena, self.root, idx);
        let node = self.free(idx);
        tracing::trace!(
            target: "avl_forest::map",
            node = idx,
            len = self.arena.len(),
            "removed"
        );
        Some(node.v)
    }

    /// Releases the detached node at `idx`, moving the last arena node into
    /// its slot.
    fn free(&mut self, idx: u32) -> AvlNode<K, V> {
        let moved = (self.arena.len() - 1) as u32;
        let node = self.arena.swap_remove(idx as usize);
        if moved != idx {
            self.root = relocate(&mut self.arena, self.root, moved, idx);
        }
        node
    }

    pub fn find(&self, key: &K) -> Option<u32> {
        find(
            &self.arena,
            self.root,
            key,
            |n| &n.k,
            |a, b| (self.comparator)(a, b),
        )
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(self.arena[idx as usize].value_mut())
    }

    /// Strict lookup.
    pub fn at(&self, key: &K) -> Result<&V, TreeError> {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn get_or_next_lower(&self, key: &K) -> Option<u32> {
        find_or_next_lower(
            &self.arena,
            self.root,
            key,
            |n| &n.k,
            |a, b| (self.comparator)(a, b),
        )
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    pub fn first(&self) -> Option<u32> {
        first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        last(&self.arena, self.root)
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        next(&self.arena, curr)
    }

    pub fn prev(&self, curr: u32) -> Option<u32> {
        prev(&self.arena, curr)
    }

    pub fn key(&self, idx: u32) -> &K {
        self.arena[idx as usize].key()
    }

    pub fn value(&self, idx: u32) -> &V {
        self.arena[idx as usize].value()
    }

    pub fn value_mut_by_index(&mut self, idx: u32) -> &mut V {
        self.arena[idx as usize].value_mut()
    }

    /// Stored balance factor of the node at `idx`.
    pub fn balance(&self, idx: u32) -> i8 {
        self.arena[idx as usize].bf
    }

    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            map: self,
            front: self.first(),
            back: self.last(),
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn for_each<G: FnMut(u32, &AvlNode<K, V>)>(&self, mut f: G) {
        let mut curr = self.first();
        while let Some(i) = curr {
            f(i, &self.arena[i as usize]);
            curr = self.next(i);
        }
    }

    pub fn assert_valid(&self) -> Result<(), TreeError> {
        util::assert_avl_tree(&self.arena, self.root, &self.comparator)?;
        let reachable = size(&self.arena, self.root);
        if reachable != self.arena.len() {
            return Err(TreeError::SizeMismatch {
                expected: self.arena.len(),
                actual: reachable,
            });
        }
        Ok(())
    }

    pub fn is_balanced(&self) -> bool {
        self.assert_valid().is_ok()
    }
}

/// In-order iterator over `(&K, &V)` pairs.
pub struct Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    map: &'a AvlMap<K, V, C>,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front?;
        self.front = self.map.next(i);
        self.remaining -= 1;
        let n = &self.map.arena[i as usize];
        Some((&n.k, &n.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back?;
        self.back = self.map.prev(i);
        self.remaining -= 1;
        let n = &self.map.arena[i as usize];
        Some((&n.k, &n.v))
    }
}

impl<'a, K, V, C> ExactSizeIterator for Iter<'a, K, V, C> where C: Fn(&K, &K) -> i32 {}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Extend<(K, V)> for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> fmt::Debug for AvlMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> fmt::Display for AvlMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AvlMap\n{}", util::print(&self.arena, self.root, ""))
    }
}
