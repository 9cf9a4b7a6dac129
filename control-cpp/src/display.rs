use crate::control::Control;
use crate::ids::IdentifierId;
use crate::ids::NameId;
use crate::name::Name;
use crate::ty::FullySpecifiedType;
use crate::ty::Qualifiers;
use crate::ty::Type;
use std::fmt;

/// Renders a canonical [`Name`] the way it would be spelled in source.
#[derive(Clone, Copy, Debug)]
pub struct NameDisplay<'a> {
  control: &'a Control,
  name: NameId,
}

impl<'a> NameDisplay<'a> {
  pub fn new(control: &'a Control, name: NameId) -> Self {
    Self { control, name }
  }

  fn fmt_identifier(&self, f: &mut fmt::Formatter<'_>, id: IdentifierId) -> fmt::Result {
    match self.control.get_identifier(id) {
      Some(literal) => write!(f, "{literal}"),
      None => write!(f, "<ident#{}>", id.0),
    }
  }

  fn fmt_name(&self, f: &mut fmt::Formatter<'_>, name: NameId) -> fmt::Result {
    fmt::Display::fmt(&NameDisplay::new(self.control, name), f)
  }
}

impl<'a> fmt::Display for NameDisplay<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Some(name) = self.control.get_name(self.name) else {
      return write!(f, "<name#{}>", self.name.0);
    };
    match name {
      Name::Simple(id) => self.fmt_identifier(f, *id),
      Name::Destructor(id) => {
        write!(f, "~")?;
        self.fmt_identifier(f, *id)
      }
      Name::Operator(kind) => {
        let spelling = kind.spelling();
        // Word operators need a space, symbolic ones don't.
        if spelling.starts_with(|c: char| c.is_ascii_alphabetic()) {
          write!(f, "operator {spelling}")
        } else {
          write!(f, "operator{spelling}")
        }
      }
      Name::Conversion(ty) => write!(f, "operator {}", TypeDisplay::new(self.control, *ty)),
      Name::Qualified { names, is_global } => {
        if *is_global {
          write!(f, "::")?;
        }
        for (idx, component) in names.iter().enumerate() {
          if idx > 0 {
            write!(f, "::")?;
          }
          self.fmt_name(f, *component)?;
        }
        Ok(())
      }
      Name::Template {
        identifier,
        arguments,
      } => {
        self.fmt_identifier(f, *identifier)?;
        write!(f, "<")?;
        for (idx, arg) in arguments.iter().enumerate() {
          if idx > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{}", TypeDisplay::new(self.control, *arg))?;
        }
        write!(f, ">")
      }
      Name::Selector {
        names,
        has_arguments,
      } => {
        // Unary selectors (`has_arguments == false`) carry one component.
        for component in names.iter() {
          self.fmt_name(f, *component)?;
          if *has_arguments {
            write!(f, ":")?;
          }
        }
        Ok(())
      }
    }
  }
}

/// Renders a [`FullySpecifiedType`] as a C declaration with no declarator
/// name (`const int *`, `char [16]`, `char (*)[16]`, `int C::*`).
#[derive(Clone, Copy, Debug)]
pub struct TypeDisplay<'a> {
  control: &'a Control,
  ty: FullySpecifiedType,
}

impl<'a> TypeDisplay<'a> {
  pub fn new(control: &'a Control, ty: impl Into<FullySpecifiedType>) -> Self {
    Self {
      control,
      ty: ty.into(),
    }
  }

  /// Writes `ty` around an abstract declarator built by the enclosing types.
  /// `pointer_like` is set when the declarator ends in `*`, `&` or `::*`, so an
  /// array suffix has to be parenthesized to bind to it.
  fn fmt_declared(
    &self,
    f: &mut fmt::Formatter<'_>,
    ty: FullySpecifiedType,
    declarator: &str,
    pointer_like: bool,
  ) -> fmt::Result {
    match self.control.get_type(ty.ty) {
      Some(Type::Pointer(element)) => {
        let declarator = pointer_declarator("*", ty.qualifiers, declarator);
        self.fmt_declared(f, *element, &declarator, true)
      }
      Some(Type::Reference(element)) => {
        let declarator = pointer_declarator("&", ty.qualifiers, declarator);
        self.fmt_declared(f, *element, &declarator, true)
      }
      Some(Type::PointerToMember {
        member_name,
        element,
      }) => {
        let operator = format!("{}::*", NameDisplay::new(self.control, *member_name));
        let declarator = pointer_declarator(&operator, ty.qualifiers, declarator);
        self.fmt_declared(f, *element, &declarator, true)
      }
      Some(Type::Array { element, size }) => {
        let declarator = if pointer_like {
          format!("({declarator})[{size}]")
        } else {
          format!("{declarator}[{size}]")
        };
        // Qualifiers on an array apply to its elements.
        let element =
          FullySpecifiedType::with_qualifiers(element.ty, element.qualifiers | ty.qualifiers);
        self.fmt_declared(f, element, &declarator, false)
      }
      leaf => {
        write_qualifiers(f, ty.qualifiers)?;
        match leaf {
          Some(Type::Void) => write!(f, "void")?,
          Some(Type::Integer(kind)) => write!(f, "{}", kind.spelling())?,
          Some(Type::Float(kind)) => write!(f, "{}", kind.spelling())?,
          Some(Type::Named(name)) => write!(f, "{}", NameDisplay::new(self.control, *name))?,
          _ => write!(f, "<type#{}>", ty.ty.0)?,
        }
        if declarator.is_empty() {
          Ok(())
        } else {
          write!(f, " {declarator}")
        }
      }
    }
  }
}

fn qualifier_words(qualifiers: Qualifiers) -> Vec<&'static str> {
  let mut words = Vec::new();
  if qualifiers.contains(Qualifiers::CONST) {
    words.push("const");
  }
  if qualifiers.contains(Qualifiers::VOLATILE) {
    words.push("volatile");
  }
  words
}

fn write_qualifiers(f: &mut fmt::Formatter<'_>, qualifiers: Qualifiers) -> fmt::Result {
  for word in qualifier_words(qualifiers) {
    write!(f, "{word} ")?;
  }
  Ok(())
}

/// `*`, `&` or `C::*` followed by its own qualifiers, then whatever the
/// enclosing types already declared (`* const`, `**`, `*[4]`).
fn pointer_declarator(operator: &str, qualifiers: Qualifiers, inner: &str) -> String {
  let mut declarator = operator.to_string();
  let words = qualifier_words(qualifiers);
  if !words.is_empty() {
    declarator.push(' ');
    declarator.push_str(&words.join(" "));
    if !inner.is_empty() {
      declarator.push(' ');
    }
  }
  declarator.push_str(inner);
  declarator
}

impl<'a> fmt::Display for TypeDisplay<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.fmt_declared(f, self.ty, "", false)
  }
}
