//! Recoverable diagnostics accumulated during resolution.
//!
//! Resolvers record problems here and keep going; the caller decides once,
//! at the end of a pass, whether the error count allows a result.

use serde::Serialize;
use std::fmt;

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Where a diagnostic applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// No finer location is available.
    TopLevel,
    /// A named config element (interface, method, collection, ...).
    Named(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::TopLevel => write!(f, "toplevel"),
            Location::Named(name) => write!(f, "{name}"),
        }
    }
}

/// A single recorded error or warning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn error(location: Location, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location,
            message: message.into(),
        }
    }

    pub fn warning(location: Location, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.severity.as_str(),
            self.location,
            self.message
        )
    }
}

/// Accumulates diagnostics for one resolution pass.
///
/// Owned by exactly one pass; never shared between interfaces.
#[derive(Debug, Default)]
pub struct DiagCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record a top-level error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::error(Location::TopLevel, message));
    }

    /// Record an error against a named interface or method.
    pub fn error_in(&mut self, name: &str, message: impl Into<String>) {
        self.add(Diagnostic::error(Location::Named(name.to_string()), message));
    }

    /// Record a top-level warning.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::warning(Location::TopLevel, message));
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// A value paired with the diagnostics produced while computing it.
///
/// `value` is `None` exactly when at least one error was recorded.
#[derive(Debug)]
pub struct Resolved<T> {
    pub value: Option<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Resolved<T> {
    pub fn is_ok(&self) -> bool {
        self.value.is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}
