//! Arena-based AVL trees.
//!
//! Nodes live in a `Vec` owned by the tree; every link is an `Option<u32>`
//! index into it, so parent back-references are plain non-owning indices.
//! Each node stores a balance factor (`height(right) - height(left)`) that
//! is kept in `-1..=1` by rotation-based fix-ups after every insert and
//! remove.
//!
//! ```
//! use avl_forest::AvlMap;
//!
//! let mut map = AvlMap::new();
//! for k in 1..=7 {
//!     map.insert(k, k * 10);
//! }
//! assert_eq!(map.height(), 3);
//! assert_eq!(map.root_index().map(|i| *map.key(i)), Some(4));
//!
//! map.remove(&4);
//! assert_eq!(map.get(&4), None);
//! map.assert_valid().unwrap();
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] / [`KvNode`] link traits, comparator convention |
//! | [`util`] | Generic BST primitives: `first`, `next`, `prev`, `find`, `swap`, `relocate` |
//! | [`avl`] | Rotations, insert/remove fix-ups, [`AvlMap`], [`AvlSet`] |
//! | [`binary_tree`] | Plain owned binary tree and [`equal_paths`] |
//! | [`error`] | [`TreeError`] |

pub mod avl;
pub mod binary_tree;
pub mod error;
pub mod types;
pub mod util;

pub use avl::{AvlMap, AvlNode, AvlSet};
pub use binary_tree::{equal_paths, BinaryNode};
pub use error::TreeError;
pub use types::{KvNode, Node};
