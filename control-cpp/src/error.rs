use crate::ids::SymbolId;
use crate::symbol::SymbolKind;

/// Contract violations reported by the checked entry points of
/// [`Control`](crate::Control). Interning and minting themselves never fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
  /// A qualified name needs at least one component.
  #[error("qualified name has no components")]
  EmptyQualifiedName,

  /// A selector name needs at least one component.
  #[error("selector name has no components")]
  EmptySelectorName,

  #[error("{kind:?} symbols cannot hold members")]
  NotAScope { kind: SymbolKind },

  /// Symbols belong to at most one scope.
  #[error("{member:?} is already a member of {scope:?}")]
  AlreadyEntered { member: SymbolId, scope: SymbolId },

  #[error("{0:?} cannot be entered into itself")]
  EnteredIntoItself(SymbolId),

  /// The handle was not minted by this session.
  #[error("unknown symbol {0:?}")]
  UnknownSymbol(SymbolId),
}
