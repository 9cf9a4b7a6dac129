use crate::control::Control;
use crate::ids::NameId;
use crate::ty::FullySpecifiedType;
use std::fmt;

/// Structural comparison for the cases handle equality does not cover, such
/// as matching while ignoring qualifiers. The control only holds the matcher
/// for its callers.
pub trait TypeMatcher: fmt::Debug + Send + Sync {
  fn match_types(&self, control: &Control, a: FullySpecifiedType, b: FullySpecifiedType) -> bool;

  fn match_names(&self, _control: &Control, a: NameId, b: NameId) -> bool {
    a == b
  }
}

/// Matches canonical handles exactly, qualifiers included unless told
/// otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityMatcher {
  pub ignore_qualifiers: bool,
}

impl IdentityMatcher {
  pub fn ignoring_qualifiers() -> Self {
    Self {
      ignore_qualifiers: true,
    }
  }
}

impl TypeMatcher for IdentityMatcher {
  fn match_types(&self, _control: &Control, a: FullySpecifiedType, b: FullySpecifiedType) -> bool {
    if self.ignore_qualifiers {
      a.ty == b.ty
    } else {
      a == b
    }
  }
}
