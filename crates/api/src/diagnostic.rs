use crate::models::Element;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Error,
    Warning,
    MandatoryWarning,
    Note,
}

impl DiagnosticKind {
    pub fn is_error(self) -> bool {
        self == DiagnosticKind::Error
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Error => f.write_str("error"),
            DiagnosticKind::Warning => f.write_str("warning"),
            DiagnosticKind::MandatoryWarning => f.write_str("mandatory warning"),
            DiagnosticKind::Note => f.write_str("note"),
        }
    }
}

/// A reported message, optionally attributed to an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Qualified name of the element the message is attributed to.
    pub element: Option<String>,
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, element: Option<&dyn Element>) -> Self {
        Self {
            kind,
            message: message.into(),
            element: element.map(|e| e.qualified_name()),
            location: element.and_then(|e| e.location()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(element) = &self.element {
            write!(f, " ({})", element)?;
        }
        Ok(())
    }
}

/// Sink for diagnostics surfaced to the build log.
pub trait Messager {
    fn print_message(&self, kind: DiagnosticKind, message: &str, element: Option<&dyn Element>);
}
