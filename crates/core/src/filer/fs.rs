use super::source_relative_path;
use picoservice_api::{Element, Filer, Location};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Artifact store backed by two output directories.
#[derive(Debug, Clone)]
pub struct FsFiler {
    source_output: PathBuf,
    class_output: PathBuf,
}

impl FsFiler {
    pub fn new(source_output: impl Into<PathBuf>, class_output: impl Into<PathBuf>) -> Self {
        Self {
            source_output: source_output.into(),
            class_output: class_output.into(),
        }
    }

    pub fn root(&self, location: Location) -> &Path {
        match location {
            Location::SourceOutput => &self.source_output,
            Location::ClassOutput => &self.class_output,
        }
    }

    pub fn resource_path(&self, location: Location, relative_name: &str) -> PathBuf {
        self.root(location).join(relative_name)
    }

    pub fn source_path(&self, package: &str, file_name: &str) -> PathBuf {
        self.resource_path(
            Location::SourceOutput,
            &source_relative_path(package, file_name),
        )
    }
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

impl Filer for FsFiler {
    fn read_resource(&self, location: Location, relative_name: &str) -> io::Result<Option<String>> {
        let path = self.resource_path(location, relative_name);
        if !path.is_file() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some)
    }

    fn write_resource(
        &self,
        location: Location,
        relative_name: &str,
        contents: &str,
    ) -> io::Result<()> {
        let path = self.resource_path(location, relative_name);
        ensure_parent(&path)?;
        fs::write(&path, contents)
    }

    fn source_exists(&self, package: &str, file_name: &str) -> bool {
        self.source_path(package, file_name).is_file()
    }

    fn create_source_file(
        &self,
        package: &str,
        file_name: &str,
        contents: &str,
        originating: &dyn Element,
    ) -> io::Result<()> {
        let path = self.source_path(package, file_name);
        ensure_parent(&path)?;
        debug!(
            "Creating {} for {}",
            path.display(),
            originating.qualified_name()
        );
        let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        file.write_all(contents.as_bytes())
    }

    fn overwrite_source_file(&self, package: &str, file_name: &str, contents: &str) -> io::Result<()> {
        let path = self.source_path(package, file_name);
        debug!("Overwriting {}", path.display());
        let mut file = OpenOptions::new().write(true).truncate(true).open(&path)?;
        file.write_all(contents.as_bytes())
    }
}
