//! Generation diagnostics.
//!
//! Unsupported types and unmatched whitelist entries never abort a run.
//! They are collected as [`Diagnostic`] values and returned alongside the
//! generated source, so callers (and tests) inspect them directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suppressed.
    Off,
    /// Reported; does not affect the exit code.
    #[serde(alias = "warning")]
    Warn,
    /// Reported; causes a non-zero exit code.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Off => f.pad("off"),
            Severity::Warn => f.pad("warn"),
            Severity::Error => f.pad("error"),
        }
    }
}

/// Static metadata for one diagnostic kind.
#[derive(Debug)]
pub struct DiagnosticMeta {
    /// Rule name, e.g. "unsupported-parameter".
    pub name: &'static str,
    /// Code, e.g. "B1001".
    pub code: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Severity when no config override is set.
    pub default_severity: Severity,
}

/// A parameter type has no catalog entry.
pub static UNSUPPORTED_PARAMETER: DiagnosticMeta = DiagnosticMeta {
    name: "unsupported-parameter",
    code: "B1001",
    description: "Parameter type has no marshaling rule",
    default_severity: Severity::Warn,
};

/// A return type has no catalog entry.
pub static UNSUPPORTED_RETURN: DiagnosticMeta = DiagnosticMeta {
    name: "unsupported-return",
    code: "B1002",
    description: "Return type has no marshaling rule",
    default_severity: Severity::Warn,
};

/// No overload of a whitelisted name could be bound.
pub static UNBOUND_FUNCTION: DiagnosticMeta = DiagnosticMeta {
    name: "unbound-function",
    code: "B1003",
    description: "No overload of the function could be bound",
    default_severity: Severity::Warn,
};

/// A whitelist entry matched no declaration.
pub static UNMATCHED_WHITELIST: DiagnosticMeta = DiagnosticMeta {
    name: "unmatched-whitelist",
    code: "B2001",
    description: "Whitelisted name was not found in the AST",
    default_severity: Severity::Warn,
};

/// Every diagnostic kind, in code order.
pub fn all() -> [&'static DiagnosticMeta; 4] {
    [
        &UNSUPPORTED_PARAMETER,
        &UNSUPPORTED_RETURN,
        &UNBOUND_FUNCTION,
        &UNMATCHED_WHITELIST,
    ]
}

/// Look up a diagnostic kind by rule name.
pub fn lookup(name: &str) -> Option<&'static DiagnosticMeta> {
    all().into_iter().find(|meta| meta.name == name)
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Rule name (e.g. "unsupported-parameter").
    pub rule: &'static str,
    /// Code (e.g. "B1001").
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: Severity,
    /// Binding the diagnostic belongs to (`Name` or `Struct::Name`).
    pub binding: String,
    /// The offending canonical type, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Additional notes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the kind's default severity.
    pub fn new(meta: &'static DiagnosticMeta, binding: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: meta.name,
            code: meta.code,
            message: message.into(),
            severity: meta.default_severity,
            binding: binding.into(),
            type_name: None,
            notes: Vec::new(),
        }
    }

    /// Attach the offending type.
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Attach a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}
