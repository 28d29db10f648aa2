use crate::types::{KvNode, Node};

/// AVL tree node stored in an arena.
///
/// `p`, `l` and `r` are arena indices. The parent link never owns its
/// target; the arena owns every node.
#[derive(Clone, Debug)]
pub struct AvlNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// Balance factor, `height(right) - height(left)`.
    ///
    /// Holds `-2` or `2` only while a fix-up is running.
    pub bf: i8,
}

impl<K, V> AvlNode<K, V> {
    /// A detached, balanced node.
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            bf: 0,
        }
    }
}

/// Link access for the generic BST primitives in [`crate::util`].
impl<K, V> Node for AvlNode<K, V> {
    #[inline]
    fn p(&self) -> Option<u32> {
        self.p
    }

    #[inline]
    fn l(&self) -> Option<u32> {
        self.l
    }

    #[inline]
    fn r(&self) -> Option<u32> {
        self.r
    }

    /// Only rotations, swaps and removal rewrite links.
    #[inline]
    fn set_p(&mut self, parent: Option<u32>) {
        self.p = parent;
    }

    #[inline]
    fn set_l(&mut self, left: Option<u32>) {
        self.l = left;
    }

    #[inline]
    fn set_r(&mut self, right: Option<u32>) {
        self.r = right;
    }
}

/// Keys are fixed once a node is created; only the value can change.
impl<K, V> KvNode<K, V> for AvlNode<K, V> {
    fn key(&self) -> &K {
        &self.k
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }

    /// Overwrites in place. The node keeps its position and balance.
    fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.v, value)
    }
}

/// AVL-specific node behavior.
///
/// The fix-ups in [`super::util`] are generic over this trait, so any arena
/// node that can store a balance factor can be rebalanced.
pub trait AvlNodeLike<K, V>: KvNode<K, V> {
    /// `height(right) - height(left)`.
    fn bf(&self) -> i8;
    /// Stores a balance factor. Callers keep it in `-2..=2`.
    fn set_bf(&mut self, bf: i8);
}

impl<K, V> AvlNodeLike<K, V> for AvlNode<K, V> {
    fn bf(&self) -> i8 {
        self.bf
    }

    fn set_bf(&mut self, bf: i8) {
        debug_assert!((-2..=2).contains(&bf), "balance factor {bf} out of range");
        self.bf = bf;
    }
}
