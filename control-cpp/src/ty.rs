use crate::ids::NameId;
use crate::ids::TypeId;
use crate::intern::InternStats;
use crate::intern::InternTable;
use bitflags::bitflags;
use serde::Deserialize;
use serde::Serialize;

bitflags! {
  /// cv-qualifiers carried next to a type reference.
  #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
  pub struct Qualifiers: u8 {
    const CONST = 1 << 0;
    const VOLATILE = 1 << 1;
  }
}

/// A canonical type plus the qualifiers applied at one use site.
///
/// This is what sits in key positions (element types, template arguments,
/// conversion targets), so `int *` and `const int *` intern to different
/// pointer types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FullySpecifiedType {
  pub ty: TypeId,
  pub qualifiers: Qualifiers,
}

impl FullySpecifiedType {
  pub fn new(ty: TypeId) -> Self {
    Self {
      ty,
      qualifiers: Qualifiers::empty(),
    }
  }

  pub fn with_qualifiers(ty: TypeId, qualifiers: Qualifiers) -> Self {
    Self { ty, qualifiers }
  }

  pub fn is_const(&self) -> bool {
    self.qualifiers.contains(Qualifiers::CONST)
  }

  pub fn is_volatile(&self) -> bool {
    self.qualifiers.contains(Qualifiers::VOLATILE)
  }

  #[must_use]
  pub fn with_const(self) -> Self {
    Self {
      qualifiers: self.qualifiers | Qualifiers::CONST,
      ..self
    }
  }

  #[must_use]
  pub fn with_volatile(self) -> Self {
    Self {
      qualifiers: self.qualifiers | Qualifiers::VOLATILE,
      ..self
    }
  }

  /// The same type with every qualifier dropped.
  #[must_use]
  pub fn unqualified(self) -> Self {
    Self::new(self.ty)
  }
}

impl From<TypeId> for FullySpecifiedType {
  fn from(ty: TypeId) -> Self {
    Self::new(ty)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntegerKind {
  Char,
  WideChar,
  Bool,
  Short,
  Int,
  Long,
  LongLong,
}

impl IntegerKind {
  pub fn spelling(self) -> &'static str {
    match self {
      IntegerKind::Char => "char",
      IntegerKind::WideChar => "wchar_t",
      IntegerKind::Bool => "bool",
      IntegerKind::Short => "short",
      IntegerKind::Int => "int",
      IntegerKind::Long => "long",
      IntegerKind::LongLong => "long long",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FloatKind {
  Float,
  Double,
  LongDouble,
}

impl FloatKind {
  pub fn spelling(self) -> &'static str {
    match self {
      FloatKind::Float => "float",
      FloatKind::Double => "double",
      FloatKind::LongDouble => "long double",
    }
  }
}

/// Semantic shape of a type. Qualifiers are not part of a `Type`; they live
/// on the [`FullySpecifiedType`] that refers to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
  Void,
  Integer(IntegerKind),
  Float(FloatKind),
  Pointer(FullySpecifiedType),
  Reference(FullySpecifiedType),
  Array {
    element: FullySpecifiedType,
    size: u32,
  },
  PointerToMember {
    member_name: NameId,
    element: FullySpecifiedType,
  },
  Named(NameId),
}

impl Type {
  /// Element type of pointers, references, arrays and pointers to member.
  pub fn element_type(&self) -> Option<FullySpecifiedType> {
    match self {
      Type::Pointer(element) | Type::Reference(element) => Some(*element),
      Type::Array { element, .. } | Type::PointerToMember { element, .. } => Some(*element),
      Type::Void | Type::Integer(_) | Type::Float(_) | Type::Named(_) => None,
    }
  }

  pub fn is_void(&self) -> bool {
    matches!(self, Type::Void)
  }

  pub fn is_scalar(&self) -> bool {
    matches!(
      self,
      Type::Integer(_) | Type::Float(_) | Type::Pointer(_) | Type::PointerToMember { .. }
    )
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInternerStats {
  pub integer: InternStats,
  pub float: InternStats,
  pub pointer: InternStats,
  pub reference: InternStats,
  pub array: InternStats,
  pub pointer_to_member: InternStats,
  pub named: InternStats,
}

impl TypeInternerStats {
  pub fn total(&self) -> InternStats {
    let mut total = InternStats::default();
    for stats in [
      &self.integer,
      &self.float,
      &self.pointer,
      &self.reference,
      &self.array,
      &self.pointer_to_member,
      &self.named,
    ] {
      total.merge(stats);
    }
    total
  }
}

/// Structural interner for [`Type`]s.
///
/// Each variant has its own ordered table keyed the way the variant compares:
/// arrays by size and then element, pointers to member by member name and then
/// element. `void` is created with the interner and never looked up.
#[derive(Debug)]
pub struct TypeInterner {
  types: Vec<Type>,
  void: TypeId,
  integer: InternTable<IntegerKind, TypeId>,
  float: InternTable<FloatKind, TypeId>,
  pointer: InternTable<FullySpecifiedType, TypeId>,
  reference: InternTable<FullySpecifiedType, TypeId>,
  array: InternTable<(u32, FullySpecifiedType), TypeId>,
  pointer_to_member: InternTable<(NameId, FullySpecifiedType), TypeId>,
  named: InternTable<NameId, TypeId>,
}

impl Default for TypeInterner {
  fn default() -> Self {
    Self::new()
  }
}

fn push_type(types: &mut Vec<Type>, ty: Type) -> TypeId {
  let id = TypeId::from_index(types.len());
  types.push(ty);
  id
}

impl TypeInterner {
  pub fn new() -> Self {
    let mut types = Vec::new();
    let void = push_type(&mut types, Type::Void);
    Self {
      types,
      void,
      integer: InternTable::default(),
      float: InternTable::default(),
      pointer: InternTable::default(),
      reference: InternTable::default(),
      array: InternTable::default(),
      pointer_to_member: InternTable::default(),
      named: InternTable::default(),
    }
  }

  pub fn void_type(&self) -> TypeId {
    self.void
  }

  pub fn integer_type(&mut self, kind: IntegerKind) -> TypeId {
    let types = &mut self.types;
    let (id, hit) = self
      .integer
      .intern(kind, |kind| push_type(types, Type::Integer(*kind)));
    tracing::trace!(target: "control_cpp::types", variant = "integer", cache_hit = hit, ?id);
    id
  }

  pub fn float_type(&mut self, kind: FloatKind) -> TypeId {
    let types = &mut self.types;
    let (id, hit) = self
      .float
      .intern(kind, |kind| push_type(types, Type::Float(*kind)));
    tracing::trace!(target: "control_cpp::types", variant = "float", cache_hit = hit, ?id);
    id
  }

  pub fn pointer_type(&mut self, element: FullySpecifiedType) -> TypeId {
    let types = &mut self.types;
    let (id, hit) = self
      .pointer
      .intern(element, |element| push_type(types, Type::Pointer(*element)));
    tracing::trace!(target: "control_cpp::types", variant = "pointer", cache_hit = hit, ?id);
    id
  }

  pub fn reference_type(&mut self, element: FullySpecifiedType) -> TypeId {
    let types = &mut self.types;
    let (id, hit) = self
      .reference
      .intern(element, |element| push_type(types, Type::Reference(*element)));
    tracing::trace!(target: "control_cpp::types", variant = "reference", cache_hit = hit, ?id);
    id
  }

  pub fn array_type(&mut self, element: FullySpecifiedType, size: u32) -> TypeId {
    let types = &mut self.types;
    let (id, hit) = self.array.intern((size, element), |&(size, element)| {
      push_type(types, Type::Array { element, size })
    });
    tracing::trace!(target: "control_cpp::types", variant = "array", cache_hit = hit, ?id);
    id
  }

  pub fn pointer_to_member_type(
    &mut self,
    member_name: NameId,
    element: FullySpecifiedType,
  ) -> TypeId {
    let types = &mut self.types;
    let (id, hit) = self
      .pointer_to_member
      .intern((member_name, element), |&(member_name, element)| {
        push_type(types, Type::PointerToMember {
          member_name,
          element,
        })
      });
    tracing::trace!(
      target: "control_cpp::types",
      variant = "pointer_to_member",
      cache_hit = hit,
      ?id
    );
    id
  }

  pub fn named_type(&mut self, name: NameId) -> TypeId {
    let types = &mut self.types;
    let (id, hit) = self
      .named
      .intern(name, |name| push_type(types, Type::Named(*name)));
    tracing::trace!(target: "control_cpp::types", variant = "named", cache_hit = hit, ?id);
    id
  }

  pub fn get(&self, id: TypeId) -> Option<&Type> {
    self.types.get(id.index())
  }

  pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> + '_ {
    self
      .types
      .iter()
      .enumerate()
      .map(|(idx, ty)| (TypeId::from_index(idx), ty))
  }

  /// Number of canonical types, `void` included.
  pub fn len(&self) -> usize {
    self.types.len()
  }

  pub fn is_empty(&self) -> bool {
    self.types.is_empty()
  }

  pub fn stats(&self) -> TypeInternerStats {
    TypeInternerStats {
      integer: self.integer.stats(),
      float: self.float.stats(),
      pointer: self.pointer.stats(),
      reference: self.reference.stats(),
      array: self.array.stats(),
      pointer_to_member: self.pointer_to_member.stats(),
      named: self.named.stats(),
    }
  }
}
