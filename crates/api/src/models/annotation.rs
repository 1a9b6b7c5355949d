use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const RETENTION_ANNOTATION: &str = "java.lang.annotation.Retention";
pub const TARGET_ANNOTATION: &str = "java.lang.annotation.Target";

/// Name under which a single unnamed annotation argument is stored.
pub const DEFAULT_ATTRIBUTE: &str = "value";

/// A constant value carried by an annotation attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    /// Enum constant, stored by its simple name (`RUNTIME`, `TYPE`).
    EnumConstant(String),
    Str(String),
    Array(Vec<AnnotationValue>),
    /// Any other expression, kept as source text.
    Other(String),
}

impl AnnotationValue {
    /// Elements of an array value; a scalar counts as a one-element array.
    pub fn elements(&self) -> Vec<&AnnotationValue> {
        match self {
            AnnotationValue::Array(items) => items.iter().collect(),
            other => vec![other],
        }
    }

    pub fn as_enum_constant(&self) -> Option<&str> {
        match self {
            AnnotationValue::EnumConstant(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::EnumConstant(name) | AnnotationValue::Other(name) => f.write_str(name),
            AnnotationValue::Str(s) => write!(f, "\"{}\"", s),
            AnnotationValue::Array(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// An annotation as it appears on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationMirror {
    /// Fully qualified annotation type name.
    pub annotation_type: String,
    pub values: BTreeMap<String, AnnotationValue>,
}

impl AnnotationMirror {
    pub fn new(annotation_type: impl Into<String>) -> Self {
        Self {
            annotation_type: annotation_type.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn value(&self) -> Option<&AnnotationValue> {
        self.values.get(DEFAULT_ATTRIBUTE)
    }
}

/// Mirror of `java.lang.annotation.RetentionPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetentionPolicy {
    Source,
    Class,
    Runtime,
}

impl FromStr for RetentionPolicy {
    type Err = ApiError;

    fn from_str(s: &str) -> ApiResult<Self> {
        match s {
            "SOURCE" => Ok(RetentionPolicy::Source),
            "CLASS" => Ok(RetentionPolicy::Class),
            "RUNTIME" => Ok(RetentionPolicy::Runtime),
            other => Err(ApiError::UnknownRetention(other.to_string())),
        }
    }
}

/// Mirror of `java.lang.annotation.ElementType`.
///
/// Unrecognised constants are preserved so they can be reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Type,
    Field,
    Method,
    Parameter,
    Constructor,
    LocalVariable,
    AnnotationType,
    Package,
    TypeParameter,
    TypeUse,
    Module,
    RecordComponent,
    Unknown(String),
}

impl ElementType {
    pub fn parse(name: &str) -> Self {
        match name {
            "TYPE" => ElementType::Type,
            "FIELD" => ElementType::Field,
            "METHOD" => ElementType::Method,
            "PARAMETER" => ElementType::Parameter,
            "CONSTRUCTOR" => ElementType::Constructor,
            "LOCAL_VARIABLE" => ElementType::LocalVariable,
            "ANNOTATION_TYPE" => ElementType::AnnotationType,
            "PACKAGE" => ElementType::Package,
            "TYPE_PARAMETER" => ElementType::TypeParameter,
            "TYPE_USE" => ElementType::TypeUse,
            "MODULE" => ElementType::Module,
            "RECORD_COMPONENT" => ElementType::RecordComponent,
            other => ElementType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Type => "TYPE",
            ElementType::Field => "FIELD",
            ElementType::Method => "METHOD",
            ElementType::Parameter => "PARAMETER",
            ElementType::Constructor => "CONSTRUCTOR",
            ElementType::LocalVariable => "LOCAL_VARIABLE",
            ElementType::AnnotationType => "ANNOTATION_TYPE",
            ElementType::Package => "PACKAGE",
            ElementType::TypeParameter => "TYPE_PARAMETER",
            ElementType::TypeUse => "TYPE_USE",
            ElementType::Module => "MODULE",
            ElementType::RecordComponent => "RECORD_COMPONENT",
            ElementType::Unknown(name) => name,
        };
        f.write_str(name)
    }
}
