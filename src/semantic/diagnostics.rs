use crate::syntax::Position;
use log::debug;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    DuplicateSymbol,
    UndefinedSymbol,
    WrongSymbolClass,
    IncompatibleAssignment,
    InvalidOperand,
    InvalidCast,
    NothingValue,
    InvalidReturn,
    ArityMismatch,
    SignatureMismatch,
    LossyConversion,
    AlwaysTrue,
}

/// Anything that can be reported as a positioned diagnostic.
pub trait Reportable: fmt::Display {
    fn code(&self) -> DiagnosticCode;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic<'a> {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub position: Position<'a>,
    pub message: String,
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.position, self.severity, self.message)
    }
}

/// The error and warning channels of one analysis, in report order.
#[derive(Debug, Default)]
pub struct Diagnostics<'a> {
    entries: Vec<Diagnostic<'a>>,
    error_count: usize,
    warning_count: usize,
}

impl<'a> Diagnostics<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error<R: Reportable + ?Sized>(&mut self, position: Position<'a>, error: &R) {
        self.error_count += 1;
        self.push(Severity::Error, position, error);
    }

    pub fn warning<R: Reportable + ?Sized>(&mut self, position: Position<'a>, warning: &R) {
        self.warning_count += 1;
        self.push(Severity::Warning, position, warning);
    }

    fn push<R: Reportable + ?Sized>(&mut self, severity: Severity, position: Position<'a>, item: &R) {
        let diagnostic = Diagnostic {
            severity,
            code: item.code(),
            position,
            message: item.to_string(),
        };

        debug!("[diagnostics] {}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Diagnostic<'a>> + '_ {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic<'a>] {
        &self.entries
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic<'a>> + '_ {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic<'a>> + '_ {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}
