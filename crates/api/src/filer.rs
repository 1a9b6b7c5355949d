use crate::models::Element;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// Output location of the artifact store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Generated sources handed back to the compiler.
    SourceOutput,
    /// Compiled classes and resources.
    ClassOutput,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::SourceOutput => f.write_str("SOURCE_OUTPUT"),
            Location::ClassOutput => f.write_str("CLASS_OUTPUT"),
        }
    }
}

/// Artifact store for generated sources and resources.
///
/// Source files are addressed by package and file name; resources by a
/// `/`-separated path relative to the location root.
pub trait Filer {
    /// Contents of a resource, or `None` when it does not exist.
    fn read_resource(&self, location: Location, relative_name: &str) -> io::Result<Option<String>>;

    /// Replaces a resource in full, creating it when missing.
    fn write_resource(&self, location: Location, relative_name: &str, contents: &str)
    -> io::Result<()>;

    fn source_exists(&self, package: &str, file_name: &str) -> bool;

    /// Creates a new source file. Fails if it already exists.
    fn create_source_file(
        &self,
        package: &str,
        file_name: &str,
        contents: &str,
        originating: &dyn Element,
    ) -> io::Result<()>;

    /// Rewrites an existing source file in place.
    fn overwrite_source_file(&self, package: &str, file_name: &str, contents: &str)
    -> io::Result<()>;
}
