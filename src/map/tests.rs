use super::*;

use std::{collections::BTreeMap, vec::Vec};

const SEEDED_OPTIONS: Options = Options::new().with_seed(0x5eed);
const SHORT_OPTIONS: Options = Options::new()
  .with_max_height(Height::from_u8(4))
  .with_seed(0x5eed);
const FLAT_OPTIONS: Options = Options::new().with_max_height(Height::MIN);
const TALL_OPTIONS: Options = Options::new()
  .with_max_height(Height::MAX)
  .with_probability(0x7FFF)
  .with_seed(0x5eed);

fn run(f: impl Fn(Options)) {
  for opts in [
    Options::new(),
    SEEDED_OPTIONS,
    SHORT_OPTIONS,
    FLAT_OPTIONS,
    TALL_OPTIONS,
  ] {
    f(opts);
  }
}

/// Returns the keys reachable by following the links of `level` from the head.
fn keys_at<V>(map: &SkipMap<V>, level: usize) -> Vec<u64> {
  let mut keys = Vec::new();
  let mut curr = map.arena.next(NodePtr::HEAD, level);
  while !curr.is_null() {
    keys.push(map.arena.node(curr).key);
    curr = map.arena.next(curr, level);
  }
  keys
}

/// Walks every level independently and checks the structural invariants of the skiplist.
fn check_invariants<V>(map: &SkipMap<V>) {
  let max_height = map.max_height().to_usize();
  assert_eq!(map.arena.height(), max_height);

  // level 0 holds every entry exactly once, in strictly increasing order
  let mut all = Vec::new();
  let mut curr = map.arena.next(NodePtr::HEAD, 0);
  while !curr.is_null() {
    let node = map.arena.node(curr);
    assert!(node.height() >= 1);
    assert!(node.height() <= max_height);
    all.push((node.key, node.height()));
    curr = node.tower[0];
  }
  assert_eq!(all.len(), map.len(), "level 0 count != len");
  for pair in all.windows(2) {
    assert!(pair[0].0 < pair[1].0, "level 0 is not strictly increasing");
  }

  for level in 0..max_height {
    // an entry is present at `level` iff its tower is taller than `level`
    let expected: Vec<u64> = all
      .iter()
      .filter(|(_, height)| *height > level)
      .map(|(key, _)| *key)
      .collect();
    let actual = keys_at(map, level);
    assert_eq!(actual, expected, "level {level} is inconsistent");

    // the head points at the first entry tall enough for the level
    let first = map.arena.next(NodePtr::HEAD, level);
    match expected.first() {
      Some(key) => assert_eq!(map.arena.node(first).key, *key),
      None => assert!(first.is_null()),
    }
  }
}

fn empty_in(map: SkipMap<u64>) {
  assert!(map.is_empty());
  assert_eq!(map.len(), 0);
  assert!(map.get(0).is_none());
  assert!(map.get(u64::MAX).is_none());
  assert!(!map.contains_key(42));
  check_invariants(&map);
}

#[test]
fn test_send_sync() {
  fn assert_send_sync<T: Send + Sync>() {}

  assert_send_sync::<SkipMap<u64>>();
  assert_send_sync::<SkipMap<std::string::String>>();
  assert_send_sync::<Entry<u64>>();
  assert_send_sync::<EntryRef<'static, u64>>();
}

#[test]
fn test_empty() {
  run(|opts| empty_in(SkipMap::with_options(opts)));
}

fn basic_crud_in(mut map: SkipMap<i32>) {
  let kv = [(10, 1), (60, 2), (30, 3), (20, 4), (90, 5)];
  for (key, value) in kv {
    let ent = map.set(key, value);
    assert_eq!(ent.key(), key);
    assert_eq!(*ent.value(), value);
  }
  check_invariants(&map);

  for (key, value) in kv {
    assert_eq!(*map.get(key).unwrap().value(), value, "key {key}");
  }
  assert_eq!(*map.get(30).unwrap().value(), 3);
  assert_eq!(map.len(), 5);
  assert_eq!(keys_at(&map, 0), [10, 20, 30, 60, 90]);

  // update the value of an existing key
  let ent = map.set(30, 9);
  assert_eq!(*ent.value(), 9);
  assert_eq!(*map.get(30).unwrap().value(), 9);
  assert_eq!(map.len(), 5);
  check_invariants(&map);

  // remove an existing key
  let removed = map.remove(20).unwrap();
  assert_eq!(removed.key(), 20);
  assert_eq!(*removed.value(), 4);
  assert_eq!(map.len(), 4);
  assert!(map.get(20).is_none());

  // remove a key which was never inserted
  assert!(map.remove(11).is_none());
  assert_eq!(map.len(), 4);
  check_invariants(&map);

  for key in [11, 20] {
    assert!(map.get(key).is_none(), "key {key} should not exist");
  }
  assert_eq!(keys_at(&map, 0), [10, 30, 60, 90]);
}

#[test]
fn test_basic_crud() {
  run(|opts| basic_crud_in(SkipMap::with_options(opts)));
}

fn update_in(mut map: SkipMap<&'static str>) {
  for key in 0..64 {
    map.set(key, "old");
  }
  let height = map.get(17).unwrap().height();
  let before: Vec<Vec<u64>> = (0..map.max_height().to_usize())
    .map(|level| keys_at(&map, level))
    .collect();

  let ent = map.set(17, "new");
  assert_eq!(ent.height(), height);
  assert_eq!(*ent.value(), "new");
  assert_eq!(map.len(), 64);

  let after: Vec<Vec<u64>> = (0..map.max_height().to_usize())
    .map(|level| keys_at(&map, level))
    .collect();
  assert_eq!(before, after);

  assert_eq!(map.insert(17, "newer"), Some("new"));
  assert_eq!(*map.get(17).unwrap().value(), "newer");
  assert_eq!(map.insert(64, "fresh"), None);
  assert_eq!(map.len(), 65);
  check_invariants(&map);
}

#[test]
fn test_update() {
  run(|opts| update_in(SkipMap::with_options(opts)));
}

fn remove_absent_in(mut map: SkipMap<u64>) {
  for key in (0..100).map(|i| i * 2) {
    map.set(key, key);
  }
  let before = keys_at(&map, 0);

  for key in [1, 99, 199, 1000, u64::MAX] {
    assert!(map.remove(key).is_none());
  }
  assert_eq!(map.len(), 100);
  assert_eq!(keys_at(&map, 0), before);
  check_invariants(&map);
}

#[test]
fn test_remove_absent() {
  run(|opts| remove_absent_in(SkipMap::with_options(opts)));
}

fn remove_all_in(mut map: SkipMap<u64>) {
  const N: u64 = 500;
  for i in 0..N {
    map.set(i, i * 3);
  }
  check_invariants(&map);

  for i in (0..N).rev().step_by(2) {
    let ent = map.remove(i).unwrap();
    assert_eq!(ent.into_parts(), (i, i * 3));
    assert!(map.get(i).is_none());
  }
  assert_eq!(map.len(), N as usize / 2);
  check_invariants(&map);

  for i in 0..N {
    let _ = map.remove(i);
  }
  assert!(map.is_empty());
  check_invariants(&map);
}

#[test]
fn test_remove_all() {
  run(|opts| remove_all_in(SkipMap::with_options(opts)));
}

fn against_btree_in(mut map: SkipMap<u32>) {
  let mut rng = SmallRng::seed_from_u64(7);
  let mut model = BTreeMap::new();

  for round in 0..5_000u32 {
    let key = rng.random_range(0..512u64);
    match rng.random_range(0..4u8) {
      0 => assert_eq!(map.remove(key).map(Entry::into_value), model.remove(&key)),
      1 => assert_eq!(map.get(key).map(|ent| *ent.value()), model.get(&key).copied()),
      _ => assert_eq!(map.insert(key, round), model.insert(key, round)),
    }
    assert_eq!(map.len(), model.len());
  }

  check_invariants(&map);
  assert_eq!(keys_at(&map, 0), model.keys().copied().collect::<Vec<_>>());
  for (key, value) in &model {
    assert_eq!(map.get(*key).unwrap().value(), value);
  }
}

#[test]
fn test_against_btree() {
  run(|opts| against_btree_in(SkipMap::with_options(opts)));
}

#[test]
fn test_extreme_keys() {
  let mut map = SkipMap::new();
  map.set(u64::MAX, "max");
  map.set(0, "zero");
  map.set(u64::MAX / 2, "mid");
  assert_eq!(keys_at(&map, 0), [0, u64::MAX / 2, u64::MAX]);
  assert_eq!(*map.get(0).unwrap().value(), "zero");
  assert_eq!(*map.get(u64::MAX).unwrap().value(), "max");
  assert_eq!(map.remove(0).unwrap().into_value(), "zero");
  check_invariants(&map);
}

#[test]
fn test_get_mut() {
  let mut map = SkipMap::with_options(SEEDED_OPTIONS);
  map.set(5, std::vec![1u8]);
  map.get_mut(5).unwrap().push(2);
  assert_eq!(map.get(5).unwrap().value(), &[1, 2]);
  assert!(map.get_mut(6).is_none());
}

#[test]
fn test_clear() {
  let mut map = SkipMap::with_options(SHORT_OPTIONS);
  for i in 0..100 {
    map.set(i, i);
  }
  map.clear();
  assert!(map.is_empty());
  assert!(map.get(50).is_none());
  assert_eq!(map.max_height(), 4u8);
  check_invariants(&map);

  map.set(50, 1);
  assert_eq!(map.len(), 1);
  check_invariants(&map);
}

#[test]
fn test_slot_reuse() {
  let mut map = SkipMap::with_options(SEEDED_OPTIONS);
  for i in 0..32 {
    map.set(i, i);
  }
  for i in 8..24 {
    map.remove(i).unwrap();
  }
  for i in 100..116 {
    map.set(i, i);
  }
  assert_eq!(map.len(), 32);
  check_invariants(&map);
  for i in (0..8).chain(24..32).chain(100..116) {
    assert_eq!(*map.get(i).unwrap().value(), i);
  }
}

#[test]
fn test_extend_and_from_iter() {
  let mut map: SkipMap<u64> = (0..10).map(|i| (i, i)).collect();
  assert_eq!(map.len(), 10);

  map.extend((5..15).map(|i| (i, i * 10)));
  assert_eq!(map.len(), 15);
  assert_eq!(*map.get(4).unwrap().value(), 4);
  assert_eq!(*map.get(5).unwrap().value(), 50);
  check_invariants(&map);
}

#[test]
fn test_random_height_bounds() {
  run(|opts| {
    let mut map = SkipMap::<()>::with_options(opts);
    for _ in 0..1_000 {
      let height = map.random_height();
      assert!(height >= 1u8);
      assert!(height <= map.max_height());
    }
  });
}

#[test]
fn test_random_height_distribution() {
  const N: usize = 20_000;
  let mut map = SkipMap::<()>::with_options(SEEDED_OPTIONS);
  let ones = (0..N).filter(|_| map.random_height() == 1u8).count();

  // the first promotion succeeds with probability 0x3FFF / 0x10000 ≈ 0.25
  let ratio = ones as f64 / N as f64;
  assert!((0.70..0.80).contains(&ratio), "ratio {ratio}");
}

#[test]
fn test_random_height_probability_extremes() {
  let mut never = SkipMap::<()>::with_options(Options::new().with_probability(0));
  for _ in 0..1_000 {
    assert_eq!(never.random_height(), Height::MIN);
  }

  let mut always = SkipMap::<()>::with_options(
    Options::new()
      .with_max_height(Height::from_u8(8))
      .with_probability(u16::MAX)
      .with_seed(1),
  );
  let maxed = (0..1_000)
    .filter(|_| always.random_height() == 8u8)
    .count();
  assert!(maxed > 990, "maxed {maxed}");
}

#[test]
fn test_seeded_shape_is_reproducible() {
  let heights = |seed| {
    let mut map = SkipMap::with_options(Options::new().with_seed(seed));
    (0..256u64)
      .map(|key| map.set(key, ()).height())
      .collect::<Vec<_>>()
  };

  assert_eq!(heights(3), heights(3));
}

#[test]
fn test_flat_map_is_a_linked_list() {
  let mut map = SkipMap::with_options(FLAT_OPTIONS.with_probability(u16::MAX));
  for key in [5, 1, 4, 2, 3] {
    assert_eq!(map.set(key, key).height(), Height::MIN);
  }
  assert_eq!(keys_at(&map, 0), [1, 2, 3, 4, 5]);
  check_invariants(&map);
}

#[test]
fn test_debug() {
  let mut map = SkipMap::with_options(SHORT_OPTIONS);
  map.set(1, ());
  let dbg = std::format!("{map:?}");
  assert!(dbg.contains("len: 1"), "{dbg}");
  assert!(dbg.contains("max_height: Height"), "{dbg}");
}
