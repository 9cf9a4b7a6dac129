use serde::Deserialize;
use serde::Serialize;

macro_rules! id_newtype {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Debug)]
    pub struct $name(pub u32);

    impl From<u32> for $name {
      fn from(value: u32) -> Self {
        Self(value)
      }
    }

    impl From<$name> for u32 {
      fn from(value: $name) -> Self {
        value.0
      }
    }

    impl $name {
      pub fn index(self) -> usize {
        self.0 as usize
      }

      #[allow(dead_code)]
      pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect(concat!(stringify!($name), " space exhausted")))
      }
    }
  };
}

id_newtype!(
  /// Canonical identifier literal.
  IdentifierId
);
id_newtype!(
  /// Canonical string literal.
  StringLiteralId
);
id_newtype!(
  /// Canonical numeric literal.
  NumericLiteralId
);
id_newtype!(
  /// Canonical [`Name`](crate::Name).
  NameId
);
id_newtype!(
  /// Canonical [`Type`](crate::Type).
  TypeId
);
id_newtype!(
  /// A minted [`Symbol`](crate::Symbol). Never deduplicated.
  SymbolId
);
id_newtype!(
  /// Opaque handle for the translation unit currently being bound. The unit
  /// itself lives with the caller.
  TranslationUnitId
);
