//! Arena-level AVL operations.
//!
//! Balance factors follow the `height(right) - height(left)` convention.
//! Every function takes the current root and returns the (possibly new)
//! root, so callers never have to track which node a rotation promoted.

use std::fmt::Debug;

use crate::error::TreeError;
use crate::types::Node;
use crate::util::{
    first, get_l, get_p, get_r, next, prev, replace_child, set_l, set_p, set_r, swap,
};

use super::types::AvlNodeLike;

#[inline]
fn bf<K, V, N>(arena: &[N], i: u32) -> i8
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].bf()
}

#[inline]
fn set_bf<K, V, N>(arena: &mut [N], i: u32, v: i8)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_bf(v);
}

/// Promotes `n1`'s left child into `n1`'s position.
///
/// The promoted node's right subtree becomes `n1`'s left subtree and `n1`
/// becomes its right child. Balance factors are left untouched. Without a
/// left child this is a no-op.
pub fn rotate_right<N: Node>(arena: &mut [N], root: Option<u32>, n1: u32) -> Option<u32> {
    let Some(n2) = get_l(arena, n1) else {
        return root;
    };
    let p = get_p(arena, n1);
    let n2r = get_r(arena, n2);

    set_l(arena, n1, n2r);
    if let Some(n2r) = n2r {
        set_p(arena, n2r, Some(n1));
    }
    set_r(arena, n2, Some(n1));
    set_p(arena, n1, Some(n2));
    set_p(arena, n2, p);

    tracing::trace!(
        target: "avl_forest::rotate",
        pivot = n1,
        promoted = n2,
        direction = "right",
        "rotated subtree"
    );
    replace_child(arena, root, p, n1, Some(n2))
}

/// Promotes `n1`'s right child into `n1`'s position. Mirror of [`rotate_right`].
pub fn rotate_left<N: Node>(arena: &mut [N], root: Option<u32>, n1: u32) -> Option<u32> {
    let Some(n2) = get_r(arena, n1) else {
        return root;
    };
    let p = get_p(arena, n1);
    let n2l = get_l(arena, n2);

    set_r(arena, n1, n2l);
    if let Some(n2l) = n2l {
        set_p(arena, n2l, Some(n1));
    }
    set_l(arena, n2, Some(n1));
    set_p(arena, n1, Some(n2));
    set_p(arena, n2, p);

    tracing::trace!(
        target: "avl_forest::rotate",
        pivot = n1,
        promoted = n2,
        direction = "left",
        "rotated subtree"
    );
    replace_child(arena, root, p, n1, Some(n2))
}

/// Restores balance after `n` has been attached as a new child of `p`.
///
/// Walks up the ancestor chain while the subtree height keeps growing and
/// stops after the first rotation, which always restores the height the
/// subtree had before the insert.
pub fn insert_fix<K, V, N>(arena: &mut [N], root: Option<u32>, p: u32, n: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let pbf = bf(arena, p) + if get_l(arena, p) == Some(n) { -1 } else { 1 };
    set_bf(arena, p, pbf);
    if pbf == 0 {
        return root;
    }

    let (mut p, mut n) = (p, n);
    let mut root = root;
    loop {
        let Some(g) = get_p(arena, p) else {
            return root;
        };
        let p_is_left = get_l(arena, g) == Some(p);
        let gbf = bf(arena, g) + if p_is_left { -1 } else { 1 };
        set_bf(arena, g, gbf);

        match gbf {
            0 => return root,
            -1 | 1 => {
                n = p;
                p = g;
            }
            _ => {
                root = if p_is_left {
                    fix_left_heavy_insert(arena, root, g, p, n)
                } else {
                    fix_right_heavy_insert(arena, root, g, p, n)
                };
                return root;
            }
        }
    }
}

fn fix_left_heavy_insert<K, V, N>(
    arena: &mut [N],
    root: Option<u32>,
    g: u32,
    p: u32,
    n: u32,
) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    if bf(arena, p) <= 0 {
        let root = rotate_right(arena, root, g);
        set_bf(arena, p, 0);
        set_bf(arena, g, 0);
        tracing::trace!(target: "avl_forest::rebalance", node = g, "insert zig-zig (left)");
        return root;
    }

    let nbf = bf(arena, n);
    let root = rotate_left(arena, root, p);
    let root = rotate_right(arena, root, g);
    let (pbf, gbf) = match nbf {
        -1 => (0, 1),
        1 => (-1, 0),
        _ => (0, 0),
    };
    set_bf(arena, p, pbf);
    set_bf(arena, g, gbf);
    set_bf(arena, n, 0);
    tracing::trace!(target: "avl_forest::rebalance", node = g, "insert zig-zag (left)");
    root
}

fn fix_right_heavy_insert<K, V, N>(
    arena: &mut [N],
    root: Option<u32>,
    g: u32,
    p: u32,
    n: u32,
) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    if bf(arena, p) >= 0 {
        let root = rotate_left(arena, root, g);
        set_bf(arena, p, 0);
        set_bf(arena, g, 0);
        tracing::trace!(target: "avl_forest::rebalance", node = g, "insert zig-zig (right)");
        return root;
    }

    let nbf = bf(arena, n);
    let root = rotate_right(arena, root, p);
    let root = rotate_left(arena, root, g);
    let (pbf, gbf) = match nbf {
        1 => (0, -1),
        -1 => (1, 0),
        _ => (0, 0),
    };
    set_bf(arena, p, pbf);
    set_bf(arena, g, gbf);
    set_bf(arena, n, 0);
    tracing::trace!(target: "avl_forest::rebalance", node = g, "insert zig-zag (right)");
    root
}

/// Attaches `n` as the left child of leaf position `p` and rebalances.
pub fn insert_left<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    insert_fix(arena, root, p, n)
}

/// Attaches `n` as the right child of leaf position `p` and rebalances.
pub fn insert_right<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    insert_fix(arena, root, p, n)
}

/// Where a key sits, or would be attached, in a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The tree is empty; a new node becomes the root.
    Root,
    /// A node with an equal key already exists.
    Found(u32),
    /// The key belongs in the empty left slot of this node.
    Left(u32),
    /// The key belongs in the empty right slot of this node.
    Right(u32),
}

/// Standard BST descent for `key`.
pub fn locate<K, V, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Placement
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(mut curr) = root else {
        return Placement::Root;
    };
    loop {
        let cmp = comparator(key, arena[curr as usize].key());
        if cmp == 0 {
            return Placement::Found(curr);
        }
        let child = if cmp < 0 {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match child {
            Some(c) => curr = c,
            None if cmp < 0 => return Placement::Left(curr),
            None => return Placement::Right(curr),
        }
    }
}

/// Swaps the tree positions of `x` and `y` together with their balance
/// factors, so each node inherits the other's place and bookkeeping.
pub fn node_swap<K, V, N>(arena: &mut [N], root: Option<u32>, x: u32, y: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let root = swap(arena, root, x, y);
    let (xbf, ybf) = (bf(arena, x), bf(arena, y));
    set_bf(arena, x, ybf);
    set_bf(arena, y, xbf);
    root
}

/// Unlinks node `n` from the tree and rebalances.
///
/// A node with two children is first swapped with its in-order predecessor,
/// so the node actually spliced out never has more than one child. On
/// return `n` is fully detached (no parent, no children) and may be freed.
pub fn remove<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let mut root = root;
    if get_l(arena, n).is_some() && get_r(arena, n).is_some() {
        if let Some(pred) = prev(arena, n) {
            root = node_swap(arena, root, n, pred);
        }
    }

    let p = get_p(arena, n);
    let child = get_l(arena, n).or(get_r(arena, n));
    let difference = match p {
        Some(p) if get_l(arena, p) == Some(n) => 1,
        Some(_) => -1,
        None => 0,
    };

    if let Some(c) = child {
        set_p(arena, c, p);
    }
    root = replace_child(arena, root, p, n, child);
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_bf(arena, n, 0);

    remove_fix(arena, root, p, difference)
}

/// What a remove fix-up step decided about the ancestors above it.
enum Step {
    /// The subtree height is unchanged; ancestors need no update.
    Stop,
    /// The subtree rooted at this node got shorter.
    Propagate(u32),
}

/// Restores balance after the subtree on one side of `n` lost a level.
///
/// `difference` is `+1` when the left side shrank and `-1` when the right
/// side shrank.
pub fn remove_fix<K, V, N>(
    arena: &mut [N],
    root: Option<u32>,
    n: Option<u32>,
    difference: i8,
) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let mut root = root;
    let mut n = n;
    let mut difference = difference;

    while let Some(node) = n {
        let tentative = bf(arena, node) + difference;
        let step = match tentative {
            t if t <= -2 => {
                let (next_root, step) = fix_left_heavy_remove(arena, root, node);
                root = next_root;
                step
            }
            t if t >= 2 => {
                let (next_root, step) = fix_right_heavy_remove(arena, root, node);
                root = next_root;
                step
            }
            -1 | 1 => {
                set_bf(arena, node, tentative);
                Step::Stop
            }
            _ => {
                set_bf(arena, node, 0);
                Step::Propagate(node)
            }
        };

        let Step::Propagate(top) = step else {
            return root;
        };
        n = get_p(arena, top);
        if let Some(p) = n {
            difference = if get_l(arena, p) == Some(top) { 1 } else { -1 };
        }
    }

    root
}

fn fix_left_heavy_remove<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32) -> (Option<u32>, Step)
where
    N: AvlNodeLike<K, V>,
{
    let Some(c) = get_l(arena, n) else {
        return (root, Step::Stop);
    };
    match bf(arena, c) {
        -1 => {
            let root = rotate_right(arena, root, n);
            set_bf(arena, n, 0);
            set_bf(arena, c, 0);
            tracing::trace!(target: "avl_forest::rebalance", node = n, "remove zig-zig (left)");
            (root, Step::Propagate(c))
        }
        0 => {
            let root = rotate_right(arena, root, n);
            set_bf(arena, n, -1);
            set_bf(arena, c, 1);
            tracing::trace!(
                target: "avl_forest::rebalance",
                node = n,
                "remove zig-zig (left), height kept"
            );
            (root, Step::Stop)
        }
        _ => {
            let Some(g) = get_r(arena, c) else {
                return (root, Step::Stop);
            };
            let gbf = bf(arena, g);
            let root = rotate_left(arena, root, c);
            let root = rotate_right(arena, root, n);
            let (nbf, cbf) = match gbf {
                1 => (0, -1),
                -1 => (1, 0),
                _ => (0, 0),
            };
            set_bf(arena, n, nbf);
            set_bf(arena, c, cbf);
            set_bf(arena, g, 0);
            tracing::trace!(target: "avl_forest::rebalance", node = n, "remove zig-zag (left)");
            (root, Step::Propagate(g))
        }
    }
}

fn fix_right_heavy_remove<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32) -> (Option<u32>, Step)
where
    N: AvlNodeLike<K, V>,
{
    let Some(c) = get_r(arena, n) else {
        return (root, Step::Stop);
    };
    match bf(arena, c) {
        1 => {
            let root = rotate_left(arena, root, n);
            set_bf(arena, n, 0);
            set_bf(arena, c, 0);
            tracing::trace!(target: "avl_forest::rebalance", node = n, "remove zig-zig (right)");
            (root, Step::Propagate(c))
        }
        0 => {
            let root = rotate_left(arena, root, n);
            set_bf(arena, n, 1);
            set_bf(arena, c, -1);
            tracing::trace!(
                target: "avl_forest::rebalance",
                node = n,
                "remove zig-zig (right), height kept"
            );
            (root, Step::Stop)
        }
        _ => {
            let Some(g) = get_l(arena, c) else {
                return (root, Step::Stop);
            };
            let gbf = bf(arena, g);
            let root = rotate_right(arena, root, c);
            let root = rotate_left(arena, root, n);
            let (nbf, cbf) = match gbf {
                -1 => (0, 1),
                1 => (-1, 0),
                _ => (0, 0),
            };
            set_bf(arena, n, nbf);
            set_bf(arena, c, cbf);
            set_bf(arena, g, 0);
            tracing::trace!(target: "avl_forest::rebalance", node = n, "remove zig-zag (right)");
            (root, Step::Propagate(g))
        }
    }
}

/// Checks links, balance factors, AVL balance and key order. Returns the
/// height of the subtree under `node`.
fn validate_links_and_bf<K, V, N>(arena: &[N], node: u32) -> Result<i64, TreeError>
where
    N: AvlNodeLike<K, V>,
{
    let l = get_l(arena, node);
    let r = get_r(arena, node);

    let mut lh = 0;
    if let Some(l) = l {
        if get_p(arena, l) != Some(node) {
            return Err(TreeError::BrokenParentLink { node });
        }
        lh = validate_links_and_bf(arena, l)?;
    }
    let mut rh = 0;
    if let Some(r) = r {
        if get_p(arena, r) != Some(node) {
            return Err(TreeError::BrokenParentLink { node });
        }
        rh = validate_links_and_bf(arena, r)?;
    }

    let expected = rh - lh;
    if !(-1..=1).contains(&expected) {
        return Err(TreeError::Unbalanced {
            node,
            balance: expected,
        });
    }
    let actual = bf(arena, node);
    if i64::from(actual) != expected {
        return Err(TreeError::BalanceMismatch {
            node,
            expected,
            actual,
        });
    }

    Ok(1 + lh.max(rh))
}

/// Validates every AVL invariant of the tree under `root`.
pub fn assert_avl_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), TreeError>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(TreeError::RootHasParent { node: root });
    }

    validate_links_and_bf(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) >= 0 {
                return Err(TreeError::OrderViolated { node: i });
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf(),
                n.key(),
                n.value()
            )
        }
    }
}
