use crate::intern::InternStats;
use std::collections::HashMap;
use std::fmt;

type StableHasher = ahash::RandomState;

fn stable_hasher() -> StableHasher {
  ahash::RandomState::with_seeds(
    0x9e37_79b9_7f4a_7c15,
    0xc2b2_ae3d_27d4_eb4f,
    0x1656_67b1_9e37_79f9,
    0x85eb_ca6b_c8f6_9b07,
  )
}

/// Raw token text (identifier, string or numeric literal) interned by a
/// [`LiteralTable`]. Immutable once created.
#[derive(Clone, PartialEq, Eq)]
pub struct Literal {
  bytes: Box<[u8]>,
  hash: u32,
}

impl Literal {
  fn new(bytes: &[u8], hash: u32) -> Self {
    Self {
      bytes: bytes.into(),
      hash,
    }
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// The text as UTF-8, if it is valid UTF-8.
  pub fn as_str(&self) -> Option<&str> {
    std::str::from_utf8(&self.bytes).ok()
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// Hash of the bytes, fixed across runs.
  pub fn hash_code(&self) -> u32 {
    self.hash
  }
}

impl fmt::Display for Literal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", String::from_utf8_lossy(&self.bytes))
  }
}

impl fmt::Debug for Literal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Literal({:?})", String::from_utf8_lossy(&self.bytes))
  }
}

/// Deduplicating table of [`Literal`]s addressed by handle `I`.
///
/// Handles are dense indices into the table's storage, so a literal never
/// moves once created. There is no removal.
pub struct LiteralTable<I> {
  literals: Vec<Literal>,
  index: HashMap<Box<[u8]>, I, StableHasher>,
  stats: InternStats,
}

impl<I> fmt::Debug for LiteralTable<I> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LiteralTable")
      .field("len", &self.literals.len())
      .field("stats", &self.stats)
      .finish()
  }
}

impl<I> LiteralTable<I>
where
  I: Copy + From<u32> + Into<u32>,
{
  pub fn new() -> Self {
    Self::with_capacity(0)
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      literals: Vec::with_capacity(capacity),
      index: HashMap::with_capacity_and_hasher(capacity, stable_hasher()),
      stats: InternStats::default(),
    }
  }

  fn hash_bytes(bytes: &[u8]) -> u32 {
    stable_hasher().hash_one(bytes) as u32
  }

  pub fn find(&self, bytes: &[u8]) -> Option<I> {
    self.index.get(bytes).copied()
  }

  pub fn find_or_insert(&mut self, bytes: &[u8]) -> I {
    if let Some(id) = self.index.get(bytes).copied() {
      self.stats.hits += 1;
      return id;
    }
    self.stats.misses += 1;
    let raw = u32::try_from(self.literals.len()).expect("literal table exhausted");
    let id = I::from(raw);
    self
      .literals
      .push(Literal::new(bytes, Self::hash_bytes(bytes)));
    self.index.insert(bytes.into(), id);
    id
  }

  pub fn get(&self, id: I) -> Option<&Literal> {
    let raw: u32 = id.into();
    self.literals.get(raw as usize)
  }

  /// All interned literals in storage order. Each call starts a fresh pass.
  pub fn iter(&self) -> impl Iterator<Item = (I, &Literal)> + Clone + '_ {
    self
      .literals
      .iter()
      .enumerate()
      .map(|(idx, literal)| (I::from(idx as u32), literal))
  }

  pub fn len(&self) -> usize {
    self.literals.len()
  }

  pub fn is_empty(&self) -> bool {
    self.literals.is_empty()
  }

  pub fn stats(&self) -> InternStats {
    self.stats
  }
}

impl<I> Default for LiteralTable<I>
where
  I: Copy + From<u32> + Into<u32>,
{
  fn default() -> Self {
    Self::new()
  }
}
