use crate::ids::TranslationUnitId;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
  Warning,
  Error,
  Fatal,
}

/// A message a binder wants to surface to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub severity: Severity,
  pub unit: Option<TranslationUnitId>,
  pub source_location: u32,
  pub message: String,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    unit: Option<TranslationUnitId>,
    source_location: u32,
    message: impl Into<String>,
  ) -> Self {
    Self {
      severity,
      unit,
      source_location,
      message: message.into(),
    }
  }

  pub fn error(
    unit: Option<TranslationUnitId>,
    source_location: u32,
    message: impl Into<String>,
  ) -> Self {
    Self::new(Severity::Error, unit, source_location, message)
  }

  pub fn warning(
    unit: Option<TranslationUnitId>,
    source_location: u32,
    message: impl Into<String>,
  ) -> Self {
    Self::new(Severity::Warning, unit, source_location, message)
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let severity = match self.severity {
      Severity::Warning => "warning",
      Severity::Error => "error",
      Severity::Fatal => "fatal",
    };
    write!(f, "{severity}@{}: {}", self.source_location, self.message)
  }
}

/// Receiver for diagnostics produced by callers of a
/// [`Control`](crate::Control). The control only stores the client; it never
/// reports anything itself.
pub trait DiagnosticClient: fmt::Debug + Send + Sync {
  fn report(&self, diagnostic: &Diagnostic);
}
