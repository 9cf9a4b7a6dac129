use crate::error::ControlError;
use crate::ids::IdentifierId;
use crate::ids::NameId;
use crate::intern::InternStats;
use crate::intern::InternTable;
use crate::ty::FullySpecifiedType;
use serde::Deserialize;
use serde::Serialize;

/// Overloadable operators, as they appear after the `operator` keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
  New,
  Delete,
  NewArray,
  DeleteArray,
  Plus,
  Minus,
  Star,
  Slash,
  Percent,
  Amp,
  Pipe,
  Caret,
  Tilde,
  Exclaim,
  Equal,
  Less,
  Greater,
  PlusEqual,
  MinusEqual,
  StarEqual,
  SlashEqual,
  PercentEqual,
  AmpEqual,
  PipeEqual,
  CaretEqual,
  LessLess,
  GreaterGreater,
  LessLessEqual,
  GreaterGreaterEqual,
  EqualEqual,
  ExclaimEqual,
  LessEqual,
  GreaterEqual,
  AmpAmp,
  PipePipe,
  PlusPlus,
  MinusMinus,
  Comma,
  ArrowStar,
  Arrow,
  FunctionCall,
  ArrayAccess,
}

impl OperatorKind {
  pub fn spelling(self) -> &'static str {
    match self {
      OperatorKind::New => "new",
      OperatorKind::Delete => "delete",
      OperatorKind::NewArray => "new[]",
      OperatorKind::DeleteArray => "delete[]",
      OperatorKind::Plus => "+",
      OperatorKind::Minus => "-",
      OperatorKind::Star => "*",
      OperatorKind::Slash => "/",
      OperatorKind::Percent => "%",
      OperatorKind::Amp => "&",
      OperatorKind::Pipe => "|",
      OperatorKind::Caret => "^",
      OperatorKind::Tilde => "~",
      OperatorKind::Exclaim => "!",
      OperatorKind::Equal => "=",
      OperatorKind::Less => "<",
      OperatorKind::Greater => ">",
      OperatorKind::PlusEqual => "+=",
      OperatorKind::MinusEqual => "-=",
      OperatorKind::StarEqual => "*=",
      OperatorKind::SlashEqual => "/=",
      OperatorKind::PercentEqual => "%=",
      OperatorKind::AmpEqual => "&=",
      OperatorKind::PipeEqual => "|=",
      OperatorKind::CaretEqual => "^=",
      OperatorKind::LessLess => "<<",
      OperatorKind::GreaterGreater => ">>",
      OperatorKind::LessLessEqual => "<<=",
      OperatorKind::GreaterGreaterEqual => ">>=",
      OperatorKind::EqualEqual => "==",
      OperatorKind::ExclaimEqual => "!=",
      OperatorKind::LessEqual => "<=",
      OperatorKind::GreaterEqual => ">=",
      OperatorKind::AmpAmp => "&&",
      OperatorKind::PipePipe => "||",
      OperatorKind::PlusPlus => "++",
      OperatorKind::MinusMinus => "--",
      OperatorKind::Comma => ",",
      OperatorKind::ArrowStar => "->*",
      OperatorKind::Arrow => "->",
      OperatorKind::FunctionCall => "()",
      OperatorKind::ArrayAccess => "[]",
    }
  }
}

/// A semantic name. Two names of the same variant with equal fields are
/// always the same [`NameId`] within one session.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Name {
  Simple(IdentifierId),
  Destructor(IdentifierId),
  Operator(OperatorKind),
  Conversion(FullySpecifiedType),
  /// `a::b::c`, or `::a::b::c` when `is_global`. Never empty.
  Qualified {
    names: Box<[NameId]>,
    is_global: bool,
  },
  Template {
    identifier: IdentifierId,
    arguments: Box<[FullySpecifiedType]>,
  },
  /// Objective-C selector such as `setValue:forKey:`. Never empty. A
  /// selector without arguments is unary (`count`) and has exactly one
  /// component; extra components would render back to back.
  Selector {
    names: Box<[NameId]>,
    has_arguments: bool,
  },
}

impl Name {
  /// The identifier a simple, destructor or template name is spelled with.
  pub fn identifier(&self) -> Option<IdentifierId> {
    match self {
      Name::Simple(id) | Name::Destructor(id) => Some(*id),
      Name::Template { identifier, .. } => Some(*identifier),
      Name::Operator(_) | Name::Conversion(_) | Name::Qualified { .. } | Name::Selector { .. } => {
        None
      }
    }
  }

  /// Last component of a qualified name; the name itself otherwise.
  pub fn unqualified(&self, this: NameId) -> NameId {
    match self {
      Name::Qualified { names, .. } => names.last().copied().unwrap_or(this),
      _ => this,
    }
  }

  pub fn is_qualified(&self) -> bool {
    matches!(self, Name::Qualified { .. })
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameInternerStats {
  pub simple: InternStats,
  pub destructor: InternStats,
  pub operator: InternStats,
  pub conversion: InternStats,
  pub qualified: InternStats,
  pub template: InternStats,
  pub selector: InternStats,
}

impl NameInternerStats {
  pub fn total(&self) -> InternStats {
    let mut total = InternStats::default();
    for stats in [
      &self.simple,
      &self.destructor,
      &self.operator,
      &self.conversion,
      &self.qualified,
      &self.template,
      &self.selector,
    ] {
      total.merge(stats);
    }
    total
  }
}

/// Structural interner for [`Name`]s, one ordered table per variant.
///
/// Component handles passed in (identifiers, names, types) must already be
/// canonical; the tables compare them by handle only.
#[derive(Debug, Default)]
pub struct NameInterner {
  names: Vec<Name>,
  simple: InternTable<IdentifierId, NameId>,
  destructor: InternTable<IdentifierId, NameId>,
  operator: InternTable<OperatorKind, NameId>,
  conversion: InternTable<FullySpecifiedType, NameId>,
  // `is_global`/`has_arguments` order first, then the components
  // lexicographically.
  qualified: InternTable<(bool, Box<[NameId]>), NameId>,
  template: InternTable<(IdentifierId, Box<[FullySpecifiedType]>), NameId>,
  selector: InternTable<(bool, Box<[NameId]>), NameId>,
}

fn push_name(names: &mut Vec<Name>, name: Name) -> NameId {
  let id = NameId::from_index(names.len());
  names.push(name);
  id
}

impl NameInterner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Simple name for `identifier`; `None` in, `None` out, with nothing
  /// inserted.
  pub fn name_id(&mut self, identifier: Option<IdentifierId>) -> Option<NameId> {
    let identifier = identifier?;
    let names = &mut self.names;
    let (id, hit) = self
      .simple
      .intern(identifier, |identifier| push_name(names, Name::Simple(*identifier)));
    tracing::trace!(target: "control_cpp::names", variant = "simple", cache_hit = hit, ?id);
    Some(id)
  }

  pub fn destructor_name_id(&mut self, identifier: Option<IdentifierId>) -> Option<NameId> {
    let identifier = identifier?;
    let names = &mut self.names;
    let (id, hit) = self.destructor.intern(identifier, |identifier| {
      push_name(names, Name::Destructor(*identifier))
    });
    tracing::trace!(target: "control_cpp::names", variant = "destructor", cache_hit = hit, ?id);
    Some(id)
  }

  pub fn operator_name_id(&mut self, kind: OperatorKind) -> NameId {
    let names = &mut self.names;
    let (id, hit) = self
      .operator
      .intern(kind, |kind| push_name(names, Name::Operator(*kind)));
    tracing::trace!(target: "control_cpp::names", variant = "operator", cache_hit = hit, ?id);
    id
  }

  pub fn conversion_name_id(&mut self, ty: FullySpecifiedType) -> NameId {
    let names = &mut self.names;
    let (id, hit) = self
      .conversion
      .intern(ty, |ty| push_name(names, Name::Conversion(*ty)));
    tracing::trace!(target: "control_cpp::names", variant = "conversion", cache_hit = hit, ?id);
    id
  }

  pub fn template_name_id(
    &mut self,
    identifier: Option<IdentifierId>,
    arguments: &[FullySpecifiedType],
  ) -> Option<NameId> {
    let identifier = identifier?;
    let names = &mut self.names;
    let (id, hit) = self
      .template
      .intern((identifier, arguments.into()), |(identifier, arguments)| {
        push_name(names, Name::Template {
          identifier: *identifier,
          arguments: arguments.clone(),
        })
      });
    tracing::trace!(
      target: "control_cpp::names",
      variant = "template",
      arguments = arguments.len(),
      cache_hit = hit,
      ?id
    );
    Some(id)
  }

  pub fn try_qualified_name_id(
    &mut self,
    components: &[NameId],
    is_global: bool,
  ) -> Result<NameId, ControlError> {
    if components.is_empty() {
      return Err(ControlError::EmptyQualifiedName);
    }
    let names = &mut self.names;
    let (id, hit) = self
      .qualified
      .intern((is_global, components.into()), |(is_global, components)| {
        push_name(names, Name::Qualified {
          names: components.clone(),
          is_global: *is_global,
        })
      });
    tracing::trace!(
      target: "control_cpp::names",
      variant = "qualified",
      components = components.len(),
      cache_hit = hit,
      ?id
    );
    Ok(id)
  }

  pub fn try_selector_name_id(
    &mut self,
    components: &[NameId],
    has_arguments: bool,
  ) -> Result<NameId, ControlError> {
    if components.is_empty() {
      return Err(ControlError::EmptySelectorName);
    }
    let names = &mut self.names;
    let (id, hit) = self
      .selector
      .intern((has_arguments, components.into()), |(has_arguments, components)| {
        push_name(names, Name::Selector {
          names: components.clone(),
          has_arguments: *has_arguments,
        })
      });
    tracing::trace!(
      target: "control_cpp::names",
      variant = "selector",
      components = components.len(),
      cache_hit = hit,
      ?id
    );
    Ok(id)
  }

  pub fn get(&self, id: NameId) -> Option<&Name> {
    self.names.get(id.index())
  }

  pub fn iter(&self) -> impl Iterator<Item = (NameId, &Name)> + '_ {
    self
      .names
      .iter()
      .enumerate()
      .map(|(idx, name)| (NameId::from_index(idx), name))
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  pub fn stats(&self) -> NameInternerStats {
    NameInternerStats {
      simple: self.simple.stats(),
      destructor: self.destructor.stats(),
      operator: self.operator.stats(),
      conversion: self.conversion.stats(),
      qualified: self.qualified.stats(),
      template: self.template.stats(),
      selector: self.selector.stats(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ids::TypeId;

  #[test]
  fn simple_and_destructor_names_are_distinct() {
    let mut names = NameInterner::new();
    let id = Some(IdentifierId(7));
    let simple = names.name_id(id).unwrap();
    let dtor = names.destructor_name_id(id).unwrap();
    assert_ne!(simple, dtor);
    assert_eq!(names.destructor_name_id(id), Some(dtor));
    assert_eq!(names.len(), 2);
    assert_eq!(names.get(simple), Some(&Name::Simple(IdentifierId(7))));
    assert_eq!(names.get(dtor), Some(&Name::Destructor(IdentifierId(7))));
  }

  #[test]
  fn null_identifier_inserts_nothing() {
    let mut names = NameInterner::new();
    assert_eq!(names.name_id(None), None);
    assert_eq!(names.destructor_name_id(None), None);
    assert_eq!(names.template_name_id(None, &[]), None);
    assert!(names.is_empty());
    assert_eq!(names.stats().total().lookups(), 0);
  }

  #[test]
  fn global_flag_is_part_of_qualified_identity() {
    let mut names = NameInterner::new();
    let a = names.name_id(Some(IdentifierId(0))).unwrap();
    let b = names.name_id(Some(IdentifierId(1))).unwrap();
    let local = names.try_qualified_name_id(&[a, b], false).unwrap();
    let global = names.try_qualified_name_id(&[a, b], true).unwrap();
    let reversed = names.try_qualified_name_id(&[b, a], false).unwrap();
    assert_ne!(local, global);
    assert_ne!(local, reversed);
    assert_eq!(names.try_qualified_name_id(&[a, b], false), Ok(local));
  }

  #[test]
  fn empty_components_are_rejected() {
    let mut names = NameInterner::new();
    assert_eq!(
      names.try_qualified_name_id(&[], true),
      Err(ControlError::EmptyQualifiedName)
    );
    assert_eq!(
      names.try_selector_name_id(&[], false),
      Err(ControlError::EmptySelectorName)
    );
    assert!(names.is_empty());
  }

  #[test]
  fn template_argument_count_matters() {
    let mut names = NameInterner::new();
    let vector = Some(IdentifierId(3));
    let int = FullySpecifiedType::new(TypeId(1));
    let one = names.template_name_id(vector, &[int]).unwrap();
    let two = names.template_name_id(vector, &[int, int]).unwrap();
    let none = names.template_name_id(vector, &[]).unwrap();
    assert_ne!(one, two);
    assert_ne!(one, none);
    assert_eq!(names.template_name_id(vector, &[int]), Some(one));
  }

  #[test]
  fn unqualified_returns_last_component() {
    let mut names = NameInterner::new();
    let a = names.name_id(Some(IdentifierId(0))).unwrap();
    let b = names.name_id(Some(IdentifierId(1))).unwrap();
    let q = names.try_qualified_name_id(&[a, b], false).unwrap();
    assert_eq!(names.get(q).unwrap().unqualified(q), b);
    assert_eq!(names.get(a).unwrap().unqualified(a), a);
  }
}
