use super::*;
use crate::storage::Storage;
#[cfg(feature = "arrayvec_storage")]
use {crate::StorageError, arrayvec::ArrayVec};

const SAMPLE_KEYS: [i32; 10] = [8, 3, 10, 1, 6, 3, 7, 14, 13, 4];

fn sample() -> OrderedMap<i32, i32> {
    let mut map = OrderedMap::new();
    for (i, &key) in SAMPLE_KEYS.iter().enumerate() {
        map.insert(key, i as i32);
    }
    map
}

/// Walks the whole tree from the root and checks every structural invariant, returning the number of nodes reached.
fn check_structure<K: Ord + Copy, V, S>(map: &OrderedMap<K, V, S>) -> usize
where S: Storage<Element = Node<K, V>> {
    let root = match map.root {
        Some(root) => root,
        None => {
            assert_eq!(map.storage.len(), 0, "empty tree with nodes left in the storage");
            return 0;
        }
    };
    assert_eq!(map.node(root).parent, None, "the root has a parent");
    // (position, exclusive lower bound, exclusive upper bound)
    let mut pending = vec![(root, None, None)];
    let mut reached = 0;
    while let Some((position, lower, upper)) = pending.pop() {
        reached += 1;
        let node = map.node(position);
        assert!(lower.map_or(true, |lower| lower < node.key), "ordering broken on the left");
        assert!(upper.map_or(true, |upper| node.key < upper), "ordering broken on the right");
        if let Some(left) = node.left {
            assert_eq!(map.node(left).parent, Some(position), "left child has a wrong parent");
            pending.push((left, lower, Some(node.key)));
        }
        if let Some(right) = node.right {
            assert_eq!(map.node(right).parent, Some(position), "right child has a wrong parent");
            pending.push((right, Some(node.key), upper));
        }
    }
    assert_eq!(reached, map.storage.len(), "some nodes are unreachable from the root");
    reached
}

fn keys_of<S>(map: &OrderedMap<i32, i32, S>) -> Vec<i32>
where S: Storage<Element = Node<i32, i32>> {
    map.keys().copied().collect()
}

#[test]
fn sample_scenario() {
    let mut map = sample();
    assert_eq!(check_structure(&map), 9);
    assert_eq!(map.len(), 9);
    assert_eq!(keys_of(&map), [1, 3, 4, 6, 7, 8, 10, 13, 14]);
    assert_eq!(map.get(&3), Some(&5));

    assert!(map.find(&7) != map.end());
    assert_eq!(map.find(&7).key(), &7);
    assert!(map.find(&16) == map.end());
    assert!(map.find(&9).is_end());

    assert_eq!(map.balance(), Rebalance::Rebuilt { len: 9, height: 4 });
    check_structure(&map);
    assert_eq!(keys_of(&map), [1, 3, 4, 6, 7, 8, 10, 13, 14]);
    assert!(map.height() <= 4);
}

#[test]
fn insert_overwrites_in_place() {
    let mut map = OrderedMap::<_, _>::new();
    assert_eq!(map.insert("b", 1), None);
    assert_eq!(map.insert("a", 2), None);
    let before = map.find("a").raw_position();
    assert_eq!(map.insert("a", 3), Some(2));
    assert_eq!(map.find("a").raw_position(), before);
    assert_eq!(map.len(), 2);
    assert_eq!(map["a"], 3);
}

#[test]
fn root_has_no_parent_and_leaves_point_up() {
    let mut map = OrderedMap::<_, _>::new();
    map.insert(5, ());
    map.insert(2, ());
    map.insert(9, ());
    let root = map.find(&5);
    assert!(root.is_root());
    assert!(root.parent().is_none());
    let left = root.left_child().expect("2 goes to the left");
    let right = root.right_child().expect("9 goes to the right");
    assert_eq!(left.key(), &2);
    assert_eq!(right.key(), &9);
    assert!(left.is_leaf() && right.is_leaf());
    assert!(left.parent() == Some(root));
    assert!(right.parent() == Some(root));
}

#[test]
fn sorted_insertion_degenerates() {
    let ascending: OrderedMap<_, _> = (0..32).map(|x| (x, x)).collect();
    assert_eq!(ascending.height(), 32);
    let descending: OrderedMap<_, _> = (0..32).rev().map(|x| (x, x)).collect();
    assert_eq!(descending.height(), 32);
    check_structure(&ascending);
    check_structure(&descending);
    assert_eq!(ascending, descending);
}

#[test]
fn successor_climbs_past_visited_ancestors() {
    // 50's successor is 60, reached by climbing from 50 through 40 and 30 up to 60.
    let map: OrderedMap<_, _> = [60, 30, 70, 20, 40, 50].iter().map(|&x| (x, ())).collect();
    let mut cursor = map.find(&50);
    cursor.move_next();
    assert_eq!(cursor.key(), &60);
    cursor.move_next();
    assert_eq!(cursor.key(), &70);
    cursor.move_next();
    assert!(cursor.is_end());
}

#[test]
fn cursor_walk_matches_iter() {
    let map = sample();
    let mut cursor = map.begin();
    let mut walked = Vec::new();
    while cursor != map.end() {
        walked.push(*cursor.key());
        cursor = cursor.successor();
    }
    assert_eq!(walked, keys_of(&map));
}

#[test]
fn empty_map_edge_cases() {
    let mut map = OrderedMap::<i32, i32>::new();
    assert!(map.begin() == map.end());
    assert!(map.find(&1).is_end());
    assert_eq!(map.first_key_value(), None);
    assert_eq!(map.last_key_value(), None);
    assert_eq!(map.balance(), Rebalance::Empty);
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.height(), 0);
    assert_eq!(map.iter().next(), None);
    assert_eq!(map.to_string(), "");
    assert!(map.clone().is_empty());
}

#[test]
#[should_panic(expected = "past the end")]
fn reading_the_end_panics() {
    let map = sample();
    let _ = map.end().key();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "different maps")]
fn comparing_cursors_of_different_maps_is_caught() {
    let a = sample();
    let b = sample();
    let _ = a.begin() == b.begin();
}

#[test]
fn mutation_through_cursors_and_iterators() {
    let mut map = sample();
    *map.find_mut(&6).value_mut() = 600;
    assert_eq!(map.get(&6), Some(&600));

    let mut cursor = map.begin_mut();
    while !cursor.is_end() {
        *cursor.value_mut() += 1;
        cursor.move_next();
    }
    for (key, value) in map.iter_mut() {
        *value -= *key;
    }
    for value in map.values_mut() {
        *value *= 2;
    }
    assert_eq!(map.get(&6), Some(&((601 - 6) * 2)));
    assert_eq!(map.get(&14), Some(&((7 + 1 - 14) * 2)));

    let cursor: Cursor<'_, _, _> = map.find_mut(&1).into();
    assert_eq!(cursor.key(), &1);
}

#[test]
fn balance_is_minimal_and_lower_median_biased() {
    for len in 0..=64_i32 {
        let mut map: OrderedMap<_, _> = (0..len).map(|x| (x, -x)).collect();
        let expected_height = (usize::BITS - (len as usize).leading_zeros()) as usize;
        match map.balance() {
            Rebalance::Empty => assert_eq!(len, 0),
            Rebalance::Rebuilt { len: rebuilt, height } => {
                assert_eq!(rebuilt, len as usize);
                assert_eq!(height, expected_height);
            }
        }
        assert_eq!(map.height(), expected_height);
        assert_eq!(check_structure(&map), len as usize);
        assert!(map.iter().map(|(k, v)| (*k, *v)).eq((0..len).map(|x| (x, -x))));
    }
    let mut four: OrderedMap<_, _> = (1..=4).map(|x| (x, ())).collect();
    four.balance();
    // [1, 2, 3, 4] splits at index 1
    assert!(four.find(&2).is_root());
}

#[test]
fn clone_is_deep_and_independent() {
    let mut original = sample();
    let mut copy = original.clone();
    check_structure(&copy);
    assert_eq!(copy, original);

    copy.insert(100, 0);
    *copy.get_mut(&8).expect("copied") = -1;
    assert!(!original.contains_key(&100));
    assert_eq!(original.get(&8), Some(&0));

    original.clear();
    assert_eq!(copy.len(), 10);
    check_structure(&copy);
}

#[test]
fn clone_from_replaces_contents() {
    let source = sample();
    let mut destination: OrderedMap<_, _> = vec![(-5, -5)].into_iter().collect();
    destination.clone_from(&source);
    assert_eq!(destination, source);
    assert!(!destination.contains_key(&-5));
    check_structure(&destination);
}

#[test]
fn take_leaves_source_empty() {
    let mut source = sample();
    let before = keys_of(&source);
    let moved = source.take();
    assert_eq!(keys_of(&moved), before);
    assert!(source.begin() == source.end());
    assert_eq!(source.len(), 0);
}

#[test]
fn display_lists_entries_in_order() {
    let mut map = OrderedMap::<_, _>::new();
    map.insert(10, "ten");
    map.insert(2, "two");
    assert_eq!(map.to_string(), "2: two\n10: ten\n");
    assert_eq!(format!("{:?}", map), r#"{2: "two", 10: "ten"}"#);
}

#[test]
fn owning_iterator_yields_sorted_pairs() {
    let map = sample();
    let pairs: Vec<_> = map.into_iter().collect();
    assert_eq!(pairs.len(), 9);
    assert!(pairs.windows(2).all(|pair| pair[0].0 < pair[1].0));
    assert_eq!(pairs[0], (1, 3));
}

#[test]
#[cfg(feature = "arrayvec_storage")]
fn fixed_capacity_map_reports_exhaustion() {
    let mut map = ArrayOrderedMap::<u8, u8, [Node<u8, u8>; 4]>::new();
    for key in 0..4 {
        assert_eq!(map.try_insert(key, key), Ok(None));
    }
    assert_eq!(
        map.try_insert(4, 4),
        Err(StorageError::CapacityExceeded { capacity: 4 }),
    );
    // Overwriting needs no room.
    assert_eq!(map.try_insert(2, 20), Ok(Some(2)));
    assert_eq!(map.len(), 4);
    check_structure(&map);

    assert_eq!(map.balance(), Rebalance::Rebuilt { len: 4, height: 3 });
    let copy = map.clone();
    assert_eq!(copy, map);
    check_structure(&copy);
}

#[test]
fn clear_keeps_capacity() {
    let mut map = sample();
    let capacity = map.capacity();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.capacity(), capacity);
    map.insert(1, 1);
    assert_eq!(check_structure(&map), 1);
}

#[test]
#[cfg(feature = "arrayvec_storage")]
fn storage_positions_are_stable() {
    let mut storage = ArrayVec::<[Node<i32, ()>; 2]>::new();
    let first = Storage::add(&mut storage, Node::leaf(1, (), None));
    let second = Storage::add(&mut storage, Node::leaf(2, (), Some(first)));
    assert_eq!((first, second), (0, 1));
    assert_eq!(Storage::get(&storage, second).and_then(|node| node.parent), Some(first));
}
