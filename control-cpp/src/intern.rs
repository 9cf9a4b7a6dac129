use serde::Deserialize;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Hit/miss counters for a find-or-insert table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternStats {
  pub hits: u64,
  pub misses: u64,
}

impl InternStats {
  pub fn lookups(&self) -> u64 {
    self.hits + self.misses
  }

  pub fn hit_rate(&self) -> f64 {
    let total = self.lookups();
    if total == 0 {
      0.0
    } else {
      self.hits as f64 / total as f64
    }
  }

  pub fn merge(&mut self, other: &InternStats) {
    self.hits += other.hits;
    self.misses += other.misses;
  }
}

/// Ordered find-or-insert index from a structural key to the handle of the
/// canonical object it was first seen with.
///
/// The key's `Ord` is the comparator of the table. `intern` descends the tree
/// once: on a miss the vacant slot found by that descent is filled, so there
/// is no separate lookup-then-insert.
#[derive(Debug)]
pub(crate) struct InternTable<K, I> {
  index: BTreeMap<K, I>,
  stats: InternStats,
}

impl<K, I> Default for InternTable<K, I> {
  fn default() -> Self {
    Self {
      index: BTreeMap::new(),
      stats: InternStats::default(),
    }
  }
}

impl<K: Ord, I: Copy> InternTable<K, I> {
  /// Returns the handle for `key`, calling `alloc` to create the canonical
  /// object only when the key has not been seen before. The flag is `true`
  /// on a hit.
  pub fn intern(&mut self, key: K, alloc: impl FnOnce(&K) -> I) -> (I, bool) {
    match self.index.entry(key) {
      Entry::Occupied(entry) => {
        self.stats.hits += 1;
        (*entry.get(), true)
      }
      Entry::Vacant(entry) => {
        self.stats.misses += 1;
        let id = alloc(entry.key());
        entry.insert(id);
        (id, false)
      }
    }
  }

  pub fn stats(&self) -> InternStats {
    self.stats
  }
}
