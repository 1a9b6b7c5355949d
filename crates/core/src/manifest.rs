//! Service manifest merging.
//!
//! The manifest lists one registration class per line. Existing entries are
//! never dropped: every build unions its generated names into whatever is
//! already there, and the file is rewritten sorted.

use picoservice_api::{DiagnosticKind, Filer, Location, Messager};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Result of one merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestUpdate {
    pub path: String,
    /// Final sorted entries.
    pub entries: Vec<String>,
    /// Number of entries read from the existing manifest.
    pub previous: usize,
    pub written: bool,
}

/// Non-empty lines of a manifest, trimmed.
pub fn parse_entries(content: &str) -> impl Iterator<Item = &str> {
    content.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// One entry per line, each newline-terminated.
pub fn render_entries<'a>(entries: impl IntoIterator<Item = &'a String>) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry);
        out.push('\n');
    }
    out
}

pub struct ManifestMerger<'a> {
    filer: &'a dyn Filer,
    messager: &'a dyn Messager,
    path: String,
}

impl<'a> ManifestMerger<'a> {
    pub fn new(filer: &'a dyn Filer, messager: &'a dyn Messager, path: impl Into<String>) -> Self {
        Self {
            filer,
            messager,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Entries already present. Read failures are reported and treated as empty.
    pub fn read_existing(&self) -> BTreeSet<String> {
        match self.filer.read_resource(Location::ClassOutput, &self.path) {
            Ok(Some(content)) => parse_entries(&content).map(str::to_string).collect(),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                self.messager.print_message(
                    DiagnosticKind::Error,
                    &format!("Couldn't load existing service manifest {}: {}", self.path, e),
                    None,
                );
                BTreeSet::new()
            }
        }
    }

    /// Unions `generated` into the stored manifest and rewrites it sorted.
    pub fn merge<I, S>(&self, generated: I) -> ManifestUpdate
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries = self.read_existing();
        let previous = entries.len();
        entries.extend(generated.into_iter().map(Into::into));
        debug!(
            "Merging manifest {}: {} existing, {} total",
            self.path,
            previous,
            entries.len()
        );

        let written = match self.filer.write_resource(
            Location::ClassOutput,
            &self.path,
            &render_entries(&entries),
        ) {
            Ok(()) => {
                info!("Wrote {} entries to {}", entries.len(), self.path);
                true
            }
            Err(e) => {
                self.messager.print_message(
                    DiagnosticKind::Error,
                    &format!("Failed to write service definition file {}: {}", self.path, e),
                    None,
                );
                false
            }
        };

        ManifestUpdate {
            path: self.path.clone(),
            entries: entries.into_iter().collect(),
            previous,
            written,
        }
    }
}
