//! Processor configuration.
//!
//! Options are layered: built-in defaults, then an optional JSON file, then
//! `PICOSERVICE_*` environment variables. Command line flags are applied on
//! top by the caller.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const DEFAULT_MARKER_ANNOTATION: &str = "de.adito.picoservice.PicoService";
pub const DEFAULT_REGISTRATION_INTERFACE: &str = "de.adito.picoservice.IPicoRegistration";
pub const DEFAULT_POSTFIX: &str = "PicoService";
/// Recorded in the `@Generated` annotation of every registration class.
pub const GENERATOR_NAME: &str = "de.adito.picoservice.processor.AnnotationProcessorPico";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M%z";

pub const MARKER_ENV: &str = "PICOSERVICE_MARKER";
pub const REGISTRATION_INTERFACE_ENV: &str = "PICOSERVICE_REGISTRATION_INTERFACE";
pub const JAVA_VERSION_ENV: &str = "PICOSERVICE_JAVA_VERSION";
pub const TIMESTAMP_ENV: &str = "PICOSERVICE_TIMESTAMP";

const GENERATED_IMPORT: &str = "javax.annotation.processing.Generated";
const LEGACY_GENERATED_IMPORT: &str = "javax.annotation.Generated";

/// Java specification version of the toolchain consuming the generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JavaVersion(pub u32);

impl JavaVersion {
    pub const LEGACY: JavaVersion = JavaVersion(8);

    /// Parses `java.specification.version` style strings.
    ///
    /// `"17"` is 17, `"1.8"` is 8; anything else falls back to [`JavaVersion::LEGACY`].
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let number = match raw.strip_prefix("1.") {
            Some(minor) => minor.parse::<u32>(),
            None => raw.parse::<u32>(),
        };
        number.map(JavaVersion).unwrap_or(Self::LEGACY)
    }

    /// Import path of the `@Generated` annotation available on this version.
    pub fn generated_import(self) -> &'static str {
        if self.0 >= 9 {
            GENERATED_IMPORT
        } else {
            LEGACY_GENERATED_IMPORT
        }
    }
}

impl Default for JavaVersion {
    fn default() -> Self {
        Self::LEGACY
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorOptions {
    /// Meta-annotation marking an annotation type as a service marker.
    pub marker_annotation: String,
    /// Interface implemented by every generated registration class.
    pub registration_interface: String,
    pub postfix: String,
    pub java_version: JavaVersion,
    /// Fixed render timestamp; the current local time is used when unset.
    pub timestamp: Option<String>,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            marker_annotation: DEFAULT_MARKER_ANNOTATION.to_string(),
            registration_interface: DEFAULT_REGISTRATION_INTERFACE.to_string(),
            postfix: DEFAULT_POSTFIX.to_string(),
            java_version: JavaVersion::default(),
            timestamp: None,
        }
    }
}

impl ProcessorOptions {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Applies `PICOSERVICE_*` environment variables.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(marker) = lookup(MARKER_ENV) {
            self.marker_annotation = marker;
        }
        if let Some(interface) = lookup(REGISTRATION_INTERFACE_ENV) {
            self.registration_interface = interface;
        }
        if let Some(version) = lookup(JAVA_VERSION_ENV) {
            self.java_version = JavaVersion::parse(&version);
        }
        if let Some(timestamp) = lookup(TIMESTAMP_ENV) {
            self.timestamp = Some(timestamp);
        }
        self
    }

    /// Fixed resource path of the service manifest under the class output.
    pub fn manifest_path(&self) -> String {
        format!("META-INF/services/{}", self.registration_interface)
    }

    pub fn render_timestamp(&self) -> String {
        self.timestamp
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format(TIMESTAMP_FORMAT).to_string())
    }
}
