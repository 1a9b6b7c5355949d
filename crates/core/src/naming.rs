//! Derives registration class names from an annotated element.
//!
//! The enclosing chain is walked outward until the package is reached. Every
//! intermediate element must be a class, interface or enum; anything else
//! (a method enclosing a local class, a record, ...) aborts naming for that
//! element.

use crate::error::NamingError;
use picoservice_api::{Element, ElementKind, RegistrationDescriptor, qualify};
use std::sync::Arc;

/// Separator between nested type names in a generated class name.
pub const NESTED_SEPARATOR: char = '$';

#[derive(Debug, Clone)]
pub struct ElementNamer {
    postfix: String,
}

impl ElementNamer {
    pub fn new(postfix: impl Into<String>) -> Self {
        Self {
            postfix: postfix.into(),
        }
    }

    /// Package containing the element.
    pub fn package_of(&self, element: &dyn Element) -> Result<String, NamingError> {
        walk(element).map(|(package, _)| package)
    }

    /// Package-relative name, outermost type first, joined by `.`.
    pub fn annotated_name(&self, element: &dyn Element) -> Result<String, NamingError> {
        walk(element).map(|(_, names)| names.join("."))
    }

    /// `Outer.Inner` becomes `Outer$Inner` plus the postfix.
    pub fn generated_simple_name(&self, annotated_name: &str) -> String {
        format!(
            "{}{}",
            annotated_name.replace('.', &NESTED_SEPARATOR.to_string()),
            self.postfix
        )
    }

    pub fn describe(&self, element: &dyn Element) -> Result<RegistrationDescriptor, NamingError> {
        let (package, names) = walk(element)?;
        let annotated_name = names.join(".");
        let generated_simple_name = self.generated_simple_name(&annotated_name);
        let fully_qualified_name = qualify(&package, &generated_simple_name);
        Ok(RegistrationDescriptor {
            package,
            annotated_name,
            generated_simple_name,
            fully_qualified_name,
        })
    }
}

/// Returns the package name and the simple names from outermost type to `element`.
fn walk(element: &dyn Element) -> Result<(String, Vec<String>), NamingError> {
    if element.kind() == ElementKind::Package {
        return Ok((element.qualified_name(), Vec::new()));
    }

    let mut names = vec![element.simple_name().to_string()];
    let mut current = enclosing_of(element, element)?;
    while current.kind() != ElementKind::Package {
        names.push(current.simple_name().to_string());
        current = enclosing_of(current.as_ref(), element)?;
    }
    names.reverse();
    Ok((current.qualified_name(), names))
}

fn enclosing_of(
    current: &dyn Element,
    origin: &dyn Element,
) -> Result<Arc<dyn Element>, NamingError> {
    let enclosing = current
        .enclosing_element()
        .ok_or_else(|| NamingError::Detached {
            element: origin.qualified_name(),
        })?;
    if enclosing.kind().is_enclosing_type() {
        Ok(enclosing)
    } else {
        Err(NamingError::UnsupportedEnclosing {
            element: origin.qualified_name(),
            kind: enclosing.kind().to_string(),
        })
    }
}
