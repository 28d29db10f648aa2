use avl_forest::{AvlMap, TreeError};

type Shape = Vec<(i32, Option<u32>, Option<u32>, Option<u32>, i8)>;

fn shape(map: &AvlMap<i32, i32>) -> Shape {
    map.arena()
        .iter()
        .map(|n| (n.k, n.p, n.l, n.r, n.bf))
        .collect()
}

fn root_key(map: &AvlMap<i32, i32>) -> Option<i32> {
    map.root_index().map(|i| *map.key(i))
}

fn child_keys(map: &AvlMap<i32, i32>, key: i32) -> (Option<i32>, Option<i32>) {
    let idx = map.find(&key).expect("key present");
    let n = &map.arena()[idx as usize];
    (
        n.l.map(|i| *map.key(i)),
        n.r.map(|i| *map.key(i)),
    )
}

#[test]
fn avl_map_ascending_ladder_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    for k in 1..=7 {
        assert_eq!(map.insert(k, k * 10), None);
        map.assert_valid().unwrap();
    }
    assert_eq!(map.height(), 3);
    assert_eq!(root_key(&map), Some(4));
    assert_eq!(child_keys(&map, 4), (Some(2), Some(6)));
    assert_eq!(child_keys(&map, 2), (Some(1), Some(3)));
    assert_eq!(child_keys(&map, 6), (Some(5), Some(7)));
    for k in 1..=7 {
        let idx = map.find(&k).unwrap();
        assert_eq!(map.balance(idx), 0);
    }
}

#[test]
fn avl_map_left_chain_rotation_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    map.insert(10, 0);
    map.insert(20, 0);
    map.insert(5, 0);
    assert_eq!(root_key(&map), Some(10));
    let root = map.root_index().unwrap();
    assert_eq!(map.balance(root), 0);

    map.insert(4, 0);
    assert_eq!(map.balance(root), -1);
    assert_eq!(map.balance(map.find(&5).unwrap()), -1);
    map.assert_valid().unwrap();

    map.insert(3, 0);
    assert_eq!(root_key(&map), Some(10));
    assert_eq!(child_keys(&map, 10), (Some(4), Some(20)));
    assert_eq!(child_keys(&map, 4), (Some(3), Some(5)));
    assert_eq!(map.balance(map.find(&4).unwrap()), 0);
    assert_eq!(map.balance(map.find(&5).unwrap()), 0);
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_zig_zag_matrix() {
    for (order, expected) in [
        ([30, 10, 20], 20),
        ([10, 30, 20], 20),
        ([20, 10, 15], 15),
        ([20, 30, 25], 25),
    ] {
        let mut map = AvlMap::<i32, i32>::new();
        for k in order {
            map.insert(k, k);
        }
        assert_eq!(root_key(&map), Some(expected), "order {order:?}");
        assert_eq!(map.height(), 2);
        map.assert_valid().unwrap();
    }
}

#[test]
fn avl_map_overwrite_matrix() {
    let mut map = AvlMap::<i32, &str>::new();
    assert_eq!(map.insert(1, "a"), None);
    assert_eq!(map.insert(2, "b"), None);
    let before: Vec<_> = map.arena().iter().map(|n| (n.p, n.l, n.r, n.bf)).collect();

    assert_eq!(map.insert(1, "c"), Some("a"));
    let after: Vec<_> = map.arena().iter().map(|n| (n.p, n.l, n.r, n.bf)).collect();
    assert_eq!(before, after);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Some(&"c"));
}

#[test]
fn avl_map_remove_absent_is_noop_matrix() {
    let mut map: AvlMap<i32, i32> = (0..20).map(|k| (k * 2, k)).collect();
    let before = shape(&map);
    assert_eq!(map.remove(&7), None);
    assert_eq!(map.remove(&-1), None);
    assert_eq!(map.remove(&100), None);
    assert_eq!(shape(&map), before);

    let mut empty = AvlMap::<i32, i32>::new();
    assert_eq!(empty.remove(&1), None);
    assert!(empty.is_empty());
}

#[test]
fn avl_map_remove_present_matrix() {
    let mut map: AvlMap<i32, i32> = (0..64).map(|k| (k, k * 3)).collect();
    for k in [31, 0, 63, 32, 15, 47] {
        let len = map.len();
        assert_eq!(map.remove(&k), Some(k * 3));
        assert_eq!(map.len(), len - 1);
        assert!(!map.contains_key(&k));
        assert!(!map.keys().any(|&x| x == k));
        map.assert_valid().unwrap();
    }
}

#[test]
fn avl_map_remove_root_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    map.insert(1, 1);
    assert_eq!(map.remove(&1), Some(1));
    assert!(map.is_empty());
    assert_eq!(map.root_index(), None);
    assert_eq!(map.len(), 0);

    map.insert(1, 1);
    map.insert(2, 2);
    assert_eq!(map.remove(&1), Some(1));
    assert_eq!(root_key(&map), Some(2));
    map.assert_valid().unwrap();

    let mut map: AvlMap<i32, i32> = [(2, 0), (1, 0), (3, 0)].into_iter().collect();
    assert_eq!(map.remove(&2), Some(0));
    assert_eq!(root_key(&map), Some(1));
    assert_eq!(child_keys(&map, 1), (None, Some(3)));
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_remove_rotation_cases_matrix() {
    // Sibling with zero balance: one rotation, height kept.
    let mut map: AvlMap<i32, i32> = [10, 5, 20, 15, 30].into_iter().map(|k| (k, k)).collect();
    map.remove(&5);
    assert_eq!(root_key(&map), Some(20));
    assert_eq!(map.balance(map.root_index().unwrap()), -1);
    map.assert_valid().unwrap();

    // Sibling leaning inward: double rotation.
    let mut map: AvlMap<i32, i32> = [10, 5, 20, 15].into_iter().map(|k| (k, k)).collect();
    map.remove(&5);
    assert_eq!(root_key(&map), Some(15));
    assert_eq!(child_keys(&map, 15), (Some(10), Some(20)));
    map.assert_valid().unwrap();

    // Shrink propagates past a rotation up to the root.
    let keys = [20, 10, 30, 5, 15, 25, 40, 3, 12, 27, 50, 1];
    let mut map: AvlMap<i32, i32> = keys.into_iter().map(|k| (k, k)).collect();
    map.assert_valid().unwrap();
    for k in [25, 27, 30, 40, 50] {
        map.remove(&k);
        map.assert_valid().unwrap();
    }
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 10, 12, 15, 20]);
}

#[test]
fn avl_map_ladder_insert_delete_matrix() {
    let mut map = AvlMap::<i32, i32>::new();

    for i in 0..300 {
        map.insert(i, i);
        map.assert_valid().unwrap();
    }
    assert_eq!(map.len(), 300);

    for i in (0..300).step_by(3) {
        assert_eq!(map.remove(&i), Some(i));
        map.assert_valid().unwrap();
    }

    for i in 0..300 {
        if i % 3 == 0 {
            assert_eq!(map.get(&i), None);
        } else {
            assert_eq!(map.get(&i), Some(&i));
        }
    }
    assert_eq!(map.len(), 200);
}

#[test]
fn avl_map_iteration_matrix() {
    let mut map = AvlMap::<String, i32>::new();
    assert_eq!(map.first(), None);
    assert_eq!(map.iter().next(), None);

    map.insert("b".to_string(), 2);
    map.insert("a".to_string(), 1);
    map.insert("c".to_string(), 3);

    let mut list = Vec::new();
    let mut entry = map.first();
    while let Some(i) = entry {
        list.push((map.key(i).clone(), *map.value(i)));
        entry = map.next(i);
    }
    assert_eq!(
        list,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );

    let forward: Vec<(&String, &i32)> = map.iter().collect();
    assert_eq!(forward.len(), 3);
    assert_eq!(map.iter().len(), 3);
    let backward: Vec<&str> = map.iter().rev().map(|(k, _)| k.as_str()).collect();
    assert_eq!(backward, vec!["c", "b", "a"]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

    let mut it = map.iter();
    assert_eq!(it.next().map(|(k, _)| k.as_str()), Some("a"));
    assert_eq!(it.next_back().map(|(k, _)| k.as_str()), Some("c"));
    assert_eq!(it.next().map(|(k, _)| k.as_str()), Some("b"));
    assert_eq!(it.next_back(), None);
    assert_eq!(it.next(), None);

    let last = map.last().unwrap();
    assert_eq!(map.key(last), "c");
    assert_eq!(map.prev(last).map(|i| map.key(i).as_str()), Some("b"));

    let mut seen = Vec::new();
    map.for_each(|_i, n| seen.push(n.v));
    assert_eq!(seen, vec![1, 2, 3]);

    let mut total = 0;
    for (_, v) in &map {
        total += v;
    }
    assert_eq!(total, 6);
}

#[test]
fn avl_map_misc_api_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.height(), 0);
    assert_eq!(map.get_or_next_lower(&10), None);
    assert_eq!(map.at(&10), Err(TreeError::KeyNotFound));

    map.insert(10, 100);
    map.insert(5, 50);
    map.insert(20, 200);

    assert!(!map.is_empty());
    assert_eq!(map.at(&10), Ok(&100));
    assert_eq!(map.first().map(|i| *map.key(i)), Some(5));
    assert_eq!(map.last().map(|i| *map.key(i)), Some(20));
    assert_eq!(map.get_or_next_lower(&4), None);
    assert_eq!(map.get_or_next_lower(&19).map(|i| *map.key(i)), Some(10));
    assert_eq!(map.get_or_next_lower(&21).map(|i| *map.key(i)), Some(20));

    *map.get_mut(&10).unwrap() = 101;
    let i20 = map.find(&20).unwrap();
    *map.value_mut_by_index(i20) = 201;
    assert_eq!(map.get(&10), Some(&101));
    assert_eq!(map.get(&20), Some(&201));
    assert!(map.is_balanced());

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.first(), None);
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_custom_comparator_matrix() {
    let mut map = AvlMap::with_comparator(|a: &i32, b: &i32| b - a);
    for k in 0..10 {
        map.insert(k, ());
    }
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, (0..10).rev().collect::<Vec<_>>());
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_formatting_matrix() {
    let map: AvlMap<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
    assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);

    let dump = map.to_string();
    assert!(dump.starts_with("AvlMap\nNode["));
    assert!(dump.contains("[bf=-1] { 2 = \"b\" }"));
    assert!(dump.contains("[bf=0] { 1 = \"a\" }"));

    let empty = AvlMap::<i32, i32>::new();
    assert_eq!(empty.to_string(), "AvlMap\n∅");
}

#[test]
fn avl_map_extend_keeps_last_write_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    map.extend([(1, 1), (2, 2), (1, 3), (2, 4), (1, 5)]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Some(&5));
    assert_eq!(map.get(&2), Some(&4));
}

#[test]
fn avl_map_validation_matrix() {
    let map: AvlMap<i32, i32> = (0..8).map(|k| (k, k)).collect();
    assert_eq!(map.assert_valid(), Ok(()));

    let err = TreeError::BalanceMismatch {
        node: 3,
        expected: 1,
        actual: 0,
    };
    assert_eq!(
        err.to_string(),
        "balance factor mismatch at node 3: expected 1, got 0"
    );
}

#[test]
fn avl_map_nan_key_matrix() {
    let mut map = AvlMap::<f64, i32>::new();
    assert_eq!(map.insert(1.0, 1), None);
    assert_eq!(map.insert(f64::NAN, 2), None);
    assert_eq!(map.insert(f64::NAN, 3), Some(2));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&f64::NAN), Some(&3));
    map.assert_valid().unwrap();

    map.insert(2.0, 4);
    let keys: Vec<f64> = map.keys().copied().collect();
    assert_eq!(&keys[..2], &[1.0, 2.0]);
    assert!(keys[2].is_nan());
    map.assert_valid().unwrap();

    assert_eq!(map.remove(&f64::NAN), Some(3));
    assert_eq!(map.len(), 2);
    assert!(!map.contains_key(&f64::NAN));
    map.assert_valid().unwrap();
}
