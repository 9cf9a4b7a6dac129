#![deny(missing_debug_implementations)]

//! Canonical names, types and symbols for a C/C++/Objective-C front end.
//!
//! A [`Control`] owns everything the binder creates for a translation unit:
//! literal text, [`Name`]s, [`Type`]s and [`Symbol`]s. Names and types are
//! interned structurally, so two requests with equal keys return the same
//! handle and later passes compare them with `==` instead of walking them.
//! Symbols are binding sites and are minted fresh on every call.
//!
//! # Example
//! ```
//! use control_cpp::{Control, IntegerKind};
//!
//! let mut control = Control::new();
//! let foo = control.find_or_insert_identifier("foo");
//! let name = control.name_id(foo).unwrap();
//! assert_eq!(control.name_id(foo), Some(name));
//!
//! let int = control.integer_type(IntegerKind::Int);
//! let ptr = control.pointer_type(int);
//! assert_eq!(control.pointer_type(int), ptr);
//! assert_eq!(control.display_type(ptr).to_string(), "int *");
//!
//! let a = control.new_class(0, name);
//! let b = control.new_class(10, name);
//! assert_ne!(a, b);
//! ```

mod control;
mod diagnostic;
mod display;
mod error;
mod ids;
mod intern;
mod literal;
mod matcher;
mod name;
mod options;
mod symbol;
mod ty;

pub use control::ContextKeywords;
pub use control::Control;
pub use control::ControlStats;
pub use diagnostic::Diagnostic;
pub use diagnostic::DiagnosticClient;
pub use diagnostic::Severity;
pub use display::NameDisplay;
pub use display::TypeDisplay;
pub use error::ControlError;
pub use ids::IdentifierId;
pub use ids::NameId;
pub use ids::NumericLiteralId;
pub use ids::StringLiteralId;
pub use ids::SymbolId;
pub use ids::TranslationUnitId;
pub use ids::TypeId;
pub use intern::InternStats;
pub use literal::Literal;
pub use literal::LiteralTable;
pub use matcher::IdentityMatcher;
pub use matcher::TypeMatcher;
pub use name::Name;
pub use name::NameInterner;
pub use name::NameInternerStats;
pub use name::OperatorKind;
pub use options::ControlOptions;
pub use symbol::Symbol;
pub use symbol::SymbolArena;
pub use symbol::SymbolKind;
pub use ty::FloatKind;
pub use ty::FullySpecifiedType;
pub use ty::IntegerKind;
pub use ty::Qualifiers;
pub use ty::Type;
pub use ty::TypeInterner;
pub use ty::TypeInternerStats;
