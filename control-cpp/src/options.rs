use serde::Deserialize;
use serde::Serialize;

/// Options for a [`Control`](crate::Control) session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ControlOptions {
  /// Pre-intern the Objective-C property attribute keywords (`getter`,
  /// `setter`, `readonly`, ...) when the session starts.
  pub intern_context_keywords: bool,
  /// Capacity hint for the identifier table.
  pub identifier_capacity: usize,
  /// Capacity hint for the symbol arena.
  pub symbol_capacity: usize,
}

impl Default for ControlOptions {
  fn default() -> Self {
    Self {
      intern_context_keywords: true,
      identifier_capacity: 0,
      symbol_capacity: 0,
    }
  }
}
