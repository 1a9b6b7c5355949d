use picoservice_api::{Diagnostic, DiagnosticKind, Element, Messager};
use std::cell::RefCell;
use tracing::{error, info, warn};

/// Default [`Messager`]: forwards to `tracing` and keeps every diagnostic for
/// later inspection.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<Diagnostic> {
        self.entries
            .borrow()
            .iter()
            .filter(|d| d.kind == kind)
            .cloned()
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.borrow().iter().any(|d| d.kind.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.entries.borrow().iter().filter(|d| d.kind.is_error()).count()
    }
}

impl Messager for DiagnosticLog {
    fn print_message(&self, kind: DiagnosticKind, message: &str, element: Option<&dyn Element>) {
        let diagnostic = Diagnostic::new(kind, message, element);
        match kind {
            DiagnosticKind::Error => error!("{}", diagnostic),
            DiagnosticKind::Warning | DiagnosticKind::MandatoryWarning => warn!("{}", diagnostic),
            DiagnosticKind::Note => info!("{}", diagnostic),
        }
        self.entries.borrow_mut().push(diagnostic);
    }
}
