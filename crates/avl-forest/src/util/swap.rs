use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r};

/// Exchanges the structural positions of nodes `x` and `y`.
///
/// Every parent and child link is rewired so that `x` ends up where `y` was
/// and vice versa; node payloads stay with their nodes. Handles the case
/// where one node is a direct child of the other. Returns the new root.
pub fn swap<N: Node>(arena: &mut [N], root: Option<u32>, x: u32, y: u32) -> Option<u32> {
    if x == y {
        return root;
    }

    let (xp, xl, xr) = (get_p(arena, x), get_l(arena, x), get_r(arena, x));
    let (yp, yl, yr) = (get_p(arena, y), get_l(arena, y), get_r(arena, y));

    // A link from one node to the other must turn into the reverse link.
    let flip = |link: Option<u32>, from: u32, to: u32| {
        if link == Some(from) {
            Some(to)
        } else {
            link
        }
    };

    let x_new_p = flip(yp, x, y);
    let x_new_l = flip(yl, x, y);
    let x_new_r = flip(yr, x, y);
    let y_new_p = flip(xp, y, x);
    let y_new_l = flip(xl, y, x);
    let y_new_r = flip(xr, y, x);

    // Record which slot each outer parent uses before any link changes, so
    // siblings sharing a parent are rewired independently.
    let x_slot = xp.filter(|&p| p != y).map(|p| (p, get_l(arena, p) == Some(x)));
    let y_slot = yp.filter(|&p| p != x).map(|p| (p, get_l(arena, p) == Some(y)));

    let mut root = root;
    match x_slot {
        Some((p, true)) => set_l(arena, p, Some(y)),
        Some((p, false)) => set_r(arena, p, Some(y)),
        None if xp.is_none() => root = Some(y),
        None => {}
    }
    match y_slot {
        Some((p, true)) => set_l(arena, p, Some(x)),
        Some((p, false)) => set_r(arena, p, Some(x)),
        None if yp.is_none() => root = Some(x),
        None => {}
    }

    set_p(arena, x, x_new_p);
    set_l(arena, x, x_new_l);
    set_r(arena, x, x_new_r);
    set_p(arena, y, y_new_p);
    set_l(arena, y, y_new_l);
    set_r(arena, y, y_new_r);

    for (child, parent) in [(x_new_l, x), (x_new_r, x), (y_new_l, y), (y_new_r, y)] {
        if let Some(c) = child {
            set_p(arena, c, Some(parent));
        }
    }

    root
}
