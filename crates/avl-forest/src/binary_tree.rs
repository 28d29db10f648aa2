//! Plain owned binary tree and the equal-depth leaf check.
//!
//! This node type is unrelated to the arena-backed search trees: children
//! are owned through `Box` and there is no ordering or parent link.

/// A node of a plain binary tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryNode<T> {
    pub value: T,
    pub left: Option<Box<BinaryNode<T>>>,
    pub right: Option<Box<BinaryNode<T>>>,
}

impl<T> BinaryNode<T> {
    pub fn new(value: T, left: Option<BinaryNode<T>>, right: Option<BinaryNode<T>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn leaf(value: T) -> Self {
        Self::new(value, None, None)
    }

    pub fn with_left(mut self, left: BinaryNode<T>) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    pub fn with_right(mut self, right: BinaryNode<T>) -> Self {
        self.right = Some(Box::new(right));
        self
    }
}

/// Number of nodes on the longest root-to-leaf path; `0` for an empty tree.
pub fn height<T>(node: Option<&BinaryNode<T>>) -> usize {
    match node {
        None => 0,
        Some(n) => 1 + height(n.left.as_deref()).max(height(n.right.as_deref())),
    }
}

/// Returns `true` iff every leaf of the tree lies at the same depth.
///
/// A node with a single child has no leaf of its own on the empty side, so
/// only the child's subtree is checked. Heights are recomputed at each
/// two-child node.
pub fn equal_paths<T>(root: Option<&BinaryNode<T>>) -> bool {
    let Some(root) = root else {
        return true;
    };
    match (root.left.as_deref(), root.right.as_deref()) {
        (None, None) => true,
        (Some(child), None) | (None, Some(child)) => equal_paths(Some(child)),
        (Some(l), Some(r)) => {
            height(Some(l)) == height(Some(r)) && equal_paths(Some(l)) && equal_paths(Some(r))
        }
    }
}
