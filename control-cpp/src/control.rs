use crate::diagnostic::DiagnosticClient;
use crate::display::NameDisplay;
use crate::display::TypeDisplay;
use crate::error::ControlError;
use crate::ids::IdentifierId;
use crate::ids::NameId;
use crate::ids::NumericLiteralId;
use crate::ids::StringLiteralId;
use crate::ids::SymbolId;
use crate::ids::TranslationUnitId;
use crate::ids::TypeId;
use crate::intern::InternStats;
use crate::literal::Literal;
use crate::literal::LiteralTable;
use crate::matcher::IdentityMatcher;
use crate::matcher::TypeMatcher;
use crate::name::Name;
use crate::name::NameInterner;
use crate::name::NameInternerStats;
use crate::name::OperatorKind;
use crate::options::ControlOptions;
use crate::symbol::Symbol;
use crate::symbol::SymbolArena;
use crate::symbol::SymbolKind;
use crate::ty::FloatKind;
use crate::ty::FullySpecifiedType;
use crate::ty::IntegerKind;
use crate::ty::Type;
use crate::ty::TypeInterner;
use crate::ty::TypeInternerStats;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Objective-C property attribute keywords, interned once per session so
/// they can be compared by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextKeywords {
  pub getter: IdentifierId,
  pub setter: IdentifierId,
  pub readwrite: IdentifierId,
  pub readonly: IdentifierId,
  pub assign: IdentifierId,
  pub retain: IdentifierId,
  pub copy: IdentifierId,
  pub nonatomic: IdentifierId,
}

impl ContextKeywords {
  fn intern(identifiers: &mut LiteralTable<IdentifierId>) -> Self {
    Self {
      getter: identifiers.find_or_insert(b"getter"),
      setter: identifiers.find_or_insert(b"setter"),
      readwrite: identifiers.find_or_insert(b"readwrite"),
      readonly: identifiers.find_or_insert(b"readonly"),
      assign: identifiers.find_or_insert(b"assign"),
      retain: identifiers.find_or_insert(b"retain"),
      copy: identifiers.find_or_insert(b"copy"),
      nonatomic: identifiers.find_or_insert(b"nonatomic"),
    }
  }

  pub fn contains(&self, id: IdentifierId) -> bool {
    [
      self.getter,
      self.setter,
      self.readwrite,
      self.readonly,
      self.assign,
      self.retain,
      self.copy,
      self.nonatomic,
    ]
    .contains(&id)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlStats {
  pub identifiers: usize,
  pub string_literals: usize,
  pub numeric_literals: usize,
  pub names: usize,
  pub types: usize,
  pub symbols: usize,
  pub identifier_lookups: InternStats,
  pub string_literal_lookups: InternStats,
  pub numeric_literal_lookups: InternStats,
  pub name_lookups: NameInternerStats,
  pub type_lookups: TypeInternerStats,
}

impl ControlStats {
  /// Objects owned by the session, literals and `void` included.
  pub fn owned_objects(&self) -> usize {
    self.identifiers
      + self.string_literals
      + self.numeric_literals
      + self.names
      + self.types
      + self.symbols
  }
}

macro_rules! symbol_constructors {
  ($($(#[$meta:meta])* $method:ident => $kind:ident,)*) => {
    $(
      $(#[$meta])*
      pub fn $method(&mut self, source_location: u32, name: impl Into<Option<NameId>>) -> SymbolId {
        self.new_symbol(SymbolKind::$kind, source_location, name.into())
      }
    )*
  };
}

/// Owner of every literal, name, type and symbol created while binding one
/// translation unit (or a few related ones).
///
/// Names and types are canonical: structurally equal requests return the same
/// handle, so later passes compare them with `==`. Symbols are not: every
/// `new_*` call mints a fresh one.
///
/// Handles are plain indices scoped to the `Control` that returned them and
/// can only be resolved through it. Everything is released at once when the
/// `Control` is dropped; there is no way to remove a single object.
///
/// All operations take `&mut self` or `&self`; a session is driven from one
/// thread at a time.
pub struct Control {
  options: ControlOptions,
  translation_unit: Option<TranslationUnitId>,
  diagnostic_client: Option<Arc<dyn DiagnosticClient>>,
  type_matcher: Arc<dyn TypeMatcher>,
  identifiers: LiteralTable<IdentifierId>,
  string_literals: LiteralTable<StringLiteralId>,
  numeric_literals: LiteralTable<NumericLiteralId>,
  names: NameInterner,
  types: TypeInterner,
  symbols: SymbolArena,
  keywords: Option<ContextKeywords>,
}

impl fmt::Debug for Control {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Control")
      .field("options", &self.options)
      .field("translation_unit", &self.translation_unit)
      .field("identifiers", &self.identifiers.len())
      .field("names", &self.names.len())
      .field("types", &self.types.len())
      .field("symbols", &self.symbols.len())
      .finish_non_exhaustive()
  }
}

impl Default for Control {
  fn default() -> Self {
    Self::new()
  }
}

impl Control {
  pub fn new() -> Self {
    Self::with_options(ControlOptions::default())
  }

  pub fn with_options(options: ControlOptions) -> Self {
    let mut identifiers = LiteralTable::with_capacity(options.identifier_capacity);
    let keywords = options
      .intern_context_keywords
      .then(|| ContextKeywords::intern(&mut identifiers));
    let control = Self {
      options,
      translation_unit: None,
      diagnostic_client: None,
      type_matcher: Arc::new(IdentityMatcher::default()),
      identifiers,
      string_literals: LiteralTable::new(),
      numeric_literals: LiteralTable::new(),
      names: NameInterner::new(),
      types: TypeInterner::new(),
      symbols: SymbolArena::with_capacity(options.symbol_capacity),
      keywords,
    };
    tracing::debug!(
      target: "control_cpp::control",
      identifiers = control.identifiers.len(),
      keywords = control.keywords.is_some(),
      "control session started"
    );
    control
  }

  pub fn options(&self) -> ControlOptions {
    self.options
  }

  // Translation units.

  pub fn translation_unit(&self) -> Option<TranslationUnitId> {
    self.translation_unit
  }

  /// Makes `unit` the unit stamped on newly minted symbols and returns the
  /// previous one so the caller can restore it.
  pub fn switch_translation_unit(
    &mut self,
    unit: Option<TranslationUnitId>,
  ) -> Option<TranslationUnitId> {
    let previous = std::mem::replace(&mut self.translation_unit, unit);
    tracing::debug!(target: "control_cpp::control", ?previous, current = ?unit, "switched translation unit");
    previous
  }

  // Collaborator slots.

  pub fn diagnostic_client(&self) -> Option<&Arc<dyn DiagnosticClient>> {
    self.diagnostic_client.as_ref()
  }

  /// Replaces the diagnostic client, returning the previous one.
  pub fn set_diagnostic_client(
    &mut self,
    client: Option<Arc<dyn DiagnosticClient>>,
  ) -> Option<Arc<dyn DiagnosticClient>> {
    tracing::debug!(
      target: "control_cpp::control",
      installed = client.is_some(),
      "diagnostic client changed"
    );
    std::mem::replace(&mut self.diagnostic_client, client)
  }

  pub fn type_matcher(&self) -> &Arc<dyn TypeMatcher> {
    &self.type_matcher
  }

  pub fn set_type_matcher(&mut self, matcher: Arc<dyn TypeMatcher>) -> Arc<dyn TypeMatcher> {
    std::mem::replace(&mut self.type_matcher, matcher)
  }

  /// Runs the installed [`TypeMatcher`] on two types.
  pub fn match_types(&self, a: FullySpecifiedType, b: FullySpecifiedType) -> bool {
    self.type_matcher.match_types(self, a, b)
  }

  // Literals.

  pub fn find_identifier(&self, chars: impl AsRef<[u8]>) -> Option<IdentifierId> {
    self.identifiers.find(chars.as_ref())
  }

  pub fn find_or_insert_identifier(&mut self, chars: impl AsRef<[u8]>) -> IdentifierId {
    let id = self.identifiers.find_or_insert(chars.as_ref());
    tracing::trace!(target: "control_cpp::literals", table = "identifier", ?id);
    id
  }

  pub fn find_string_literal(&self, chars: impl AsRef<[u8]>) -> Option<StringLiteralId> {
    self.string_literals.find(chars.as_ref())
  }

  pub fn find_or_insert_string_literal(&mut self, chars: impl AsRef<[u8]>) -> StringLiteralId {
    let id = self.string_literals.find_or_insert(chars.as_ref());
    tracing::trace!(target: "control_cpp::literals", table = "string", ?id);
    id
  }

  pub fn find_numeric_literal(&self, chars: impl AsRef<[u8]>) -> Option<NumericLiteralId> {
    self.numeric_literals.find(chars.as_ref())
  }

  pub fn find_or_insert_numeric_literal(&mut self, chars: impl AsRef<[u8]>) -> NumericLiteralId {
    let id = self.numeric_literals.find_or_insert(chars.as_ref());
    tracing::trace!(target: "control_cpp::literals", table = "numeric", ?id);
    id
  }

  pub fn get_identifier(&self, id: IdentifierId) -> Option<&Literal> {
    self.identifiers.get(id)
  }

  pub fn identifier(&self, id: IdentifierId) -> &Literal {
    self
      .identifiers
      .get(id)
      .expect("IdentifierId not interned by this control")
  }

  pub fn string_literal(&self, id: StringLiteralId) -> &Literal {
    self
      .string_literals
      .get(id)
      .expect("StringLiteralId not interned by this control")
  }

  pub fn numeric_literal(&self, id: NumericLiteralId) -> &Literal {
    self
      .numeric_literals
      .get(id)
      .expect("NumericLiteralId not interned by this control")
  }

  pub fn identifiers(&self) -> impl Iterator<Item = (IdentifierId, &Literal)> + Clone + '_ {
    self.identifiers.iter()
  }

  pub fn string_literals(&self) -> impl Iterator<Item = (StringLiteralId, &Literal)> + Clone + '_ {
    self.string_literals.iter()
  }

  pub fn numeric_literals(
    &self,
  ) -> impl Iterator<Item = (NumericLiteralId, &Literal)> + Clone + '_ {
    self.numeric_literals.iter()
  }

  // Names.

  /// Simple name for `identifier`. Passing `None` returns `None` and interns
  /// nothing.
  pub fn name_id(&mut self, identifier: impl Into<Option<IdentifierId>>) -> Option<NameId> {
    self.names.name_id(identifier.into())
  }

  pub fn destructor_name_id(
    &mut self,
    identifier: impl Into<Option<IdentifierId>>,
  ) -> Option<NameId> {
    self.names.destructor_name_id(identifier.into())
  }

  pub fn template_name_id(
    &mut self,
    identifier: impl Into<Option<IdentifierId>>,
    arguments: &[FullySpecifiedType],
  ) -> Option<NameId> {
    self.names.template_name_id(identifier.into(), arguments)
  }

  pub fn operator_name_id(&mut self, kind: OperatorKind) -> NameId {
    self.names.operator_name_id(kind)
  }

  pub fn conversion_name_id(&mut self, ty: impl Into<FullySpecifiedType>) -> NameId {
    self.names.conversion_name_id(ty.into())
  }

  /// Qualified name `a::b::c` (or `::a::b::c`).
  ///
  /// # Panics
  ///
  /// Panics if `names` is empty; use [`Control::try_qualified_name_id`] when
  /// the components come from unchecked input.
  pub fn qualified_name_id(&mut self, names: &[NameId], is_global: bool) -> NameId {
    match self.names.try_qualified_name_id(names, is_global) {
      Ok(id) => id,
      Err(err) => panic!("{err}"),
    }
  }

  pub fn try_qualified_name_id(
    &mut self,
    names: &[NameId],
    is_global: bool,
  ) -> Result<NameId, ControlError> {
    self.names.try_qualified_name_id(names, is_global)
  }

  /// Objective-C selector name.
  ///
  /// # Panics
  ///
  /// Panics if `names` is empty.
  pub fn selector_name_id(&mut self, names: &[NameId], has_arguments: bool) -> NameId {
    match self.names.try_selector_name_id(names, has_arguments) {
      Ok(id) => id,
      Err(err) => panic!("{err}"),
    }
  }

  pub fn try_selector_name_id(
    &mut self,
    names: &[NameId],
    has_arguments: bool,
  ) -> Result<NameId, ControlError> {
    self.names.try_selector_name_id(names, has_arguments)
  }

  pub fn get_name(&self, id: NameId) -> Option<&Name> {
    self.names.get(id)
  }

  pub fn name(&self, id: NameId) -> &Name {
    self.names.get(id).expect("NameId not interned by this control")
  }

  pub fn names(&self) -> impl Iterator<Item = (NameId, &Name)> + '_ {
    self.names.iter()
  }

  pub fn display_name(&self, id: NameId) -> NameDisplay<'_> {
    NameDisplay::new(self, id)
  }

  // Types.

  /// The session's single `void` type.
  pub fn void_type(&self) -> TypeId {
    self.types.void_type()
  }

  pub fn integer_type(&mut self, kind: IntegerKind) -> TypeId {
    self.types.integer_type(kind)
  }

  pub fn float_type(&mut self, kind: FloatKind) -> TypeId {
    self.types.float_type(kind)
  }

  pub fn pointer_type(&mut self, element: impl Into<FullySpecifiedType>) -> TypeId {
    self.types.pointer_type(element.into())
  }

  pub fn reference_type(&mut self, element: impl Into<FullySpecifiedType>) -> TypeId {
    self.types.reference_type(element.into())
  }

  pub fn array_type(&mut self, element: impl Into<FullySpecifiedType>, size: u32) -> TypeId {
    self.types.array_type(element.into(), size)
  }

  pub fn pointer_to_member_type(
    &mut self,
    member_name: NameId,
    element: impl Into<FullySpecifiedType>,
  ) -> TypeId {
    self.types.pointer_to_member_type(member_name, element.into())
  }

  pub fn named_type(&mut self, name: NameId) -> TypeId {
    self.types.named_type(name)
  }

  pub fn get_type(&self, id: TypeId) -> Option<&Type> {
    self.types.get(id)
  }

  pub fn ty(&self, id: TypeId) -> &Type {
    self.types.get(id).expect("TypeId not interned by this control")
  }

  pub fn types(&self) -> impl Iterator<Item = (TypeId, &Type)> + '_ {
    self.types.iter()
  }

  pub fn display_type(&self, ty: impl Into<FullySpecifiedType>) -> TypeDisplay<'_> {
    TypeDisplay::new(self, ty)
  }

  // Symbols.

  fn new_symbol(&mut self, kind: SymbolKind, source_location: u32, name: Option<NameId>) -> SymbolId {
    self
      .symbols
      .alloc(kind, self.translation_unit, source_location, name)
  }

  symbol_constructors! {
    new_declaration => Declaration,
    new_argument => Argument,
    new_function => Function,
    new_class => Class,
    new_namespace => Namespace,
    new_enum => Enum,
    new_base_class => BaseClass,
    new_using_declaration => UsingDeclaration,
    new_using_namespace_directive => UsingNamespaceDirective,
    new_forward_class_declaration => ForwardClassDeclaration,
    new_objc_base_class => ObjCBaseClass,
    new_objc_base_protocol => ObjCBaseProtocol,
    new_objc_class => ObjCClass,
    new_objc_forward_class_declaration => ObjCForwardClassDeclaration,
    new_objc_protocol => ObjCProtocol,
    new_objc_forward_protocol_declaration => ObjCForwardProtocolDeclaration,
    new_objc_method => ObjCMethod,
    new_objc_property_declaration => ObjCPropertyDeclaration,
  }

  /// Anonymous block scope.
  pub fn new_block(&mut self, source_location: u32) -> SymbolId {
    self.new_symbol(SymbolKind::Block, source_location, None)
  }

  pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
    self.symbols.get(id)
  }

  pub fn symbol(&self, id: SymbolId) -> &Symbol {
    self
      .symbols
      .get(id)
      .expect("SymbolId not minted by this control")
  }

  /// Minted symbols in mint order.
  pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> + '_ {
    self.symbols.iter()
  }

  /// Enters `member` into the scope symbol `scope`.
  pub fn enter_symbol(&mut self, scope: SymbolId, member: SymbolId) -> Result<(), ControlError> {
    self.symbols.enter(scope, member)
  }

  /// Members of `scope` named exactly `name`, in entry order.
  pub fn find_member(&self, scope: SymbolId, name: NameId) -> impl Iterator<Item = SymbolId> + '_ {
    self.symbols.find_members(scope, name)
  }

  // Context keywords.

  /// `None` when the session was created without context keywords.
  pub fn context_keywords(&self) -> Option<&ContextKeywords> {
    self.keywords.as_ref()
  }

  pub fn objc_getter_id(&self) -> Option<IdentifierId> {
    self.keywords.map(|k| k.getter)
  }

  pub fn objc_setter_id(&self) -> Option<IdentifierId> {
    self.keywords.map(|k| k.setter)
  }

  pub fn objc_readwrite_id(&self) -> Option<IdentifierId> {
    self.keywords.map(|k| k.readwrite)
  }

  pub fn objc_readonly_id(&self) -> Option<IdentifierId> {
    self.keywords.map(|k| k.readonly)
  }

  pub fn objc_assign_id(&self) -> Option<IdentifierId> {
    self.keywords.map(|k| k.assign)
  }

  pub fn objc_retain_id(&self) -> Option<IdentifierId> {
    self.keywords.map(|k| k.retain)
  }

  pub fn objc_copy_id(&self) -> Option<IdentifierId> {
    self.keywords.map(|k| k.copy)
  }

  pub fn objc_nonatomic_id(&self) -> Option<IdentifierId> {
    self.keywords.map(|k| k.nonatomic)
  }

  // Statistics.

  pub fn stats(&self) -> ControlStats {
    ControlStats {
      identifiers: self.identifiers.len(),
      string_literals: self.string_literals.len(),
      numeric_literals: self.numeric_literals.len(),
      names: self.names.len(),
      types: self.types.len(),
      symbols: self.symbols.len(),
      identifier_lookups: self.identifiers.stats(),
      string_literal_lookups: self.string_literals.stats(),
      numeric_literal_lookups: self.numeric_literals.stats(),
      name_lookups: self.names.stats(),
      type_lookups: self.types.stats(),
    }
  }
}

impl Drop for Control {
  fn drop(&mut self) {
    tracing::debug!(
      target: "control_cpp::control",
      identifiers = self.identifiers.len(),
      names = self.names.len(),
      types = self.types.len(),
      symbols = self.symbols.len(),
      "control session released"
    );
  }
}
