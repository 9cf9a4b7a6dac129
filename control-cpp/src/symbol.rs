use crate::error::ControlError;
use crate::ids::NameId;
use crate::ids::SymbolId;
use crate::ids::TranslationUnitId;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
  Declaration,
  Argument,
  Function,
  Class,
  Namespace,
  Block,
  Enum,
  BaseClass,
  UsingDeclaration,
  UsingNamespaceDirective,
  ForwardClassDeclaration,
  ObjCBaseClass,
  ObjCBaseProtocol,
  ObjCClass,
  ObjCForwardClassDeclaration,
  ObjCProtocol,
  ObjCForwardProtocolDeclaration,
  ObjCMethod,
  ObjCPropertyDeclaration,
}

impl SymbolKind {
  /// Whether symbols of this kind introduce a scope that other symbols can be
  /// entered into.
  pub fn is_scope(self) -> bool {
    matches!(
      self,
      SymbolKind::Function
        | SymbolKind::Class
        | SymbolKind::Namespace
        | SymbolKind::Block
        | SymbolKind::Enum
        | SymbolKind::ObjCClass
        | SymbolKind::ObjCProtocol
        | SymbolKind::ObjCMethod
    )
  }

  pub fn is_objc(self) -> bool {
    matches!(
      self,
      SymbolKind::ObjCBaseClass
        | SymbolKind::ObjCBaseProtocol
        | SymbolKind::ObjCClass
        | SymbolKind::ObjCForwardClassDeclaration
        | SymbolKind::ObjCProtocol
        | SymbolKind::ObjCForwardProtocolDeclaration
        | SymbolKind::ObjCMethod
        | SymbolKind::ObjCPropertyDeclaration
    )
  }
}

/// A binding site. Unlike names and types, symbols are never deduplicated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
  kind: SymbolKind,
  unit: Option<TranslationUnitId>,
  source_location: u32,
  name: Option<NameId>,
  enclosing_scope: Option<SymbolId>,
  members: Vec<SymbolId>,
}

impl Symbol {
  pub fn kind(&self) -> SymbolKind {
    self.kind
  }

  /// Unit that was current when the symbol was minted.
  pub fn translation_unit(&self) -> Option<TranslationUnitId> {
    self.unit
  }

  pub fn source_location(&self) -> u32 {
    self.source_location
  }

  /// `None` for anonymous constructs such as blocks.
  pub fn name(&self) -> Option<NameId> {
    self.name
  }

  pub fn enclosing_scope(&self) -> Option<SymbolId> {
    self.enclosing_scope
  }

  /// Members entered into this scope, in entry order.
  pub fn members(&self) -> &[SymbolId] {
    &self.members
  }
}

/// Owns every symbol minted in a session. Symbols are addressed by dense
/// [`SymbolId`]s and released together with the arena.
#[derive(Debug, Default)]
pub struct SymbolArena {
  symbols: Vec<Symbol>,
}

impl SymbolArena {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      symbols: Vec::with_capacity(capacity),
    }
  }

  pub fn alloc(
    &mut self,
    kind: SymbolKind,
    unit: Option<TranslationUnitId>,
    source_location: u32,
    name: Option<NameId>,
  ) -> SymbolId {
    let id = SymbolId::from_index(self.symbols.len());
    self.symbols.push(Symbol {
      kind,
      unit,
      source_location,
      name,
      enclosing_scope: None,
      members: Vec::new(),
    });
    tracing::trace!(target: "control_cpp::symbols", ?kind, source_location, ?id);
    id
  }

  pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
    self.symbols.get(id.index())
  }

  /// Records `member` as a member of `scope`. A symbol belongs to at most one
  /// scope and never to itself; since nothing can be removed from the arena,
  /// entering it a second time is refused.
  pub fn enter(&mut self, scope: SymbolId, member: SymbolId) -> Result<(), ControlError> {
    let member_symbol = self
      .get(member)
      .ok_or(ControlError::UnknownSymbol(member))?;
    if let Some(current) = member_symbol.enclosing_scope {
      return Err(ControlError::AlreadyEntered {
        member,
        scope: current,
      });
    }
    if scope == member {
      return Err(ControlError::EnteredIntoItself(member));
    }
    let scope_symbol = self
      .symbols
      .get_mut(scope.index())
      .ok_or(ControlError::UnknownSymbol(scope))?;
    if !scope_symbol.kind.is_scope() {
      return Err(ControlError::NotAScope {
        kind: scope_symbol.kind,
      });
    }
    scope_symbol.members.push(member);
    self.symbols[member.index()].enclosing_scope = Some(scope);
    Ok(())
  }

  /// Members of `scope` whose name is exactly `name`. Names are canonical, so
  /// this is a handle comparison.
  pub fn find_members(
    &self,
    scope: SymbolId,
    name: NameId,
  ) -> impl Iterator<Item = SymbolId> + '_ {
    self
      .get(scope)
      .map(|symbol| symbol.members.as_slice())
      .unwrap_or_default()
      .iter()
      .copied()
      .filter(move |member| self.symbols[member.index()].name == Some(name))
  }

  pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> + '_ {
    self
      .symbols
      .iter()
      .enumerate()
      .map(|(idx, symbol)| (SymbolId::from_index(idx), symbol))
  }

  pub fn len(&self) -> usize {
    self.symbols.len()
  }

  pub fn is_empty(&self) -> bool {
    self.symbols.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn alloc_never_deduplicates() {
    let mut arena = SymbolArena::new();
    let name = Some(NameId(0));
    let a = arena.alloc(SymbolKind::Function, None, 10, name);
    let b = arena.alloc(SymbolKind::Function, None, 10, name);
    assert_ne!(a, b);
    assert_eq!(arena.get(a), arena.get(b));
    assert_eq!(arena.len(), 2);
  }

  #[test]
  fn enter_requires_a_scope_kind() {
    let mut arena = SymbolArena::new();
    let decl = arena.alloc(SymbolKind::Declaration, None, 0, Some(NameId(0)));
    let other = arena.alloc(SymbolKind::Declaration, None, 1, Some(NameId(1)));
    assert_eq!(
      arena.enter(decl, other),
      Err(ControlError::NotAScope {
        kind: SymbolKind::Declaration
      })
    );
    assert_eq!(
      arena.enter(decl, SymbolId(99)),
      Err(ControlError::UnknownSymbol(SymbolId(99)))
    );
  }

  #[test]
  fn find_members_compares_names_by_handle() {
    let mut arena = SymbolArena::new();
    let ns = arena.alloc(SymbolKind::Namespace, None, 0, Some(NameId(0)));
    let f1 = arena.alloc(SymbolKind::Function, None, 1, Some(NameId(1)));
    let g = arena.alloc(SymbolKind::Function, None, 2, Some(NameId(2)));
    let f2 = arena.alloc(SymbolKind::Function, None, 3, Some(NameId(1)));
    for member in [f1, g, f2] {
      arena.enter(ns, member).unwrap();
    }
    let found: Vec<_> = arena.find_members(ns, NameId(1)).collect();
    assert_eq!(found, vec![f1, f2]);
    assert_eq!(arena.get(g).unwrap().enclosing_scope(), Some(ns));
    assert_eq!(arena.find_members(SymbolId(42), NameId(1)).count(), 0);
  }

  #[test]
  fn entered_symbols_cannot_be_entered_again() {
    let mut arena = SymbolArena::new();
    let ns = arena.alloc(SymbolKind::Namespace, None, 0, None);
    let block = arena.alloc(SymbolKind::Block, None, 1, None);
    arena.enter(ns, block).unwrap();
    assert_eq!(
      arena.enter(block, block),
      Err(ControlError::AlreadyEntered {
        member: block,
        scope: ns,
      })
    );
    let other = arena.alloc(SymbolKind::Block, None, 2, None);
    assert_eq!(
      arena.enter(other, other),
      Err(ControlError::EnteredIntoItself(other))
    );
    assert_eq!(arena.get(ns).unwrap().members(), &[block]);
    assert!(arena.get(other).unwrap().members().is_empty());
  }
}
