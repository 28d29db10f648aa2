//! AVL tree family: arena-level operations, the owning map, and a set.

#[path = "AvlMap.rs"]
pub mod avl_map;
#[path = "AvlSet.rs"]
pub mod avl_set;
pub mod types;
pub mod util;

pub use avl_map::{AvlMap, Iter};
pub use avl_set::AvlSet;
pub use types::{AvlNode, AvlNodeLike};
pub use util::{
    assert_avl_tree, insert_fix, insert_left, insert_right, locate, node_swap, print, remove,
    remove_fix, rotate_left, rotate_right, Placement,
};
