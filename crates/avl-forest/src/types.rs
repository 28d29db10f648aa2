//! Node trait definitions.
//!
//! Nodes live in a caller-owned [`Vec`] arena. Every "pointer" is an
//! `Option<u32>` index into that arena, so parent back-references never own
//! anything and the node graph has no reference cycles. All tree-manipulation
//! functions take the arena as a slice and work with indices.

use std::cmp::Ordering;

/// Parent / left / right links.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Comparator derived from [`PartialOrd`].
///
/// Comparators return a negative number when `a < b`, zero when equal, and
/// a positive number when `a > b`.
///
/// A value that is not comparable with itself (e.g. `NaN`) sorts after every
/// other value and equal to any other such value, so repeated inserts of it
/// overwrite one entry. Any other incomparable pair compares equal.
pub fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    match a.partial_cmp(b) {
        Some(Ordering::Less) => -1,
        Some(Ordering::Greater) => 1,
        Some(Ordering::Equal) => 0,
        None => {
            let a_unordered = a.partial_cmp(a).is_none();
            let b_unordered = b.partial_cmp(b).is_none();
            match (a_unordered, b_unordered) {
                (true, false) => 1,
                (false, true) => -1,
                _ => 0,
            }
        }
    }
}

/// Key/value node interface used by map-like structures.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    /// Replaces the value, returning the previous one.
    fn set_value(&mut self, value: V) -> V;
}
