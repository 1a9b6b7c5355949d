use serde::{Deserialize, Serialize};

/// Names derived for the registration class of one annotated element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationDescriptor {
    /// Package of the annotated element; empty for the unnamed package.
    pub package: String,
    /// Package-relative name of the annotated element, nested types joined by `.`.
    pub annotated_name: String,
    /// `annotated_name` with `.` replaced by `$`, plus the postfix.
    pub generated_simple_name: String,
    pub fully_qualified_name: String,
}

impl RegistrationDescriptor {
    /// Fully qualified source name of the annotated element.
    pub fn annotated_qualified_name(&self) -> String {
        qualify(&self.package, &self.annotated_name)
    }

    pub fn source_file_name(&self) -> String {
        format!("{}.java", self.generated_simple_name)
    }
}

/// Joins a package and a package-relative name; the unnamed package adds no prefix.
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}
