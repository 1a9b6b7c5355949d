use super::annotation::AnnotationMirror;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Structural kind of a program element as reported by the host toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Package,
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
    Method,
    Constructor,
    Field,
    Other,
}

impl ElementKind {
    /// Kinds allowed on the enclosing chain of an element that gets a registration.
    pub const ENCLOSING_TYPES: [ElementKind; 4] = [
        ElementKind::Package,
        ElementKind::Class,
        ElementKind::Interface,
        ElementKind::Enum,
    ];

    /// Class, interface, enum, record or annotation type.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            ElementKind::Class
                | ElementKind::Interface
                | ElementKind::Enum
                | ElementKind::Record
                | ElementKind::AnnotationType
        )
    }

    pub fn is_enclosing_type(self) -> bool {
        Self::ENCLOSING_TYPES.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Package => "PACKAGE",
            ElementKind::Class => "CLASS",
            ElementKind::Interface => "INTERFACE",
            ElementKind::Enum => "ENUM",
            ElementKind::Record => "RECORD",
            ElementKind::AnnotationType => "ANNOTATION_TYPE",
            ElementKind::Method => "METHOD",
            ElementKind::Constructor => "CONSTRUCTOR",
            ElementKind::Field => "FIELD",
            ElementKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of an element within one build.
///
/// Hosts pick whatever uniquely names a declaration (a source position, a
/// binary name, ...); the processor only compares keys for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementKey(String);

impl ElementKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only view of a program element.
///
/// This is the whole surface the processor needs from a host toolchain; it
/// never reaches into a concrete compiler object model.
pub trait Element: Send + Sync + fmt::Debug {
    fn key(&self) -> ElementKey;

    fn kind(&self) -> ElementKind;

    /// Simple (unqualified) name. Empty for the unnamed package.
    fn simple_name(&self) -> &str;

    /// Dotted qualified name. For packages this is the package name.
    fn qualified_name(&self) -> String;

    fn enclosing_element(&self) -> Option<Arc<dyn Element>>;

    /// Annotation of the given fully qualified type present on this element.
    fn annotation(&self, annotation_type: &str) -> Option<AnnotationMirror>;

    /// Human readable position used when attributing diagnostics.
    fn location(&self) -> Option<String> {
        None
    }
}
