use super::{MemoryFiler, source_relative_path};
use picoservice_api::{Element, Filer, Location};
use std::io;

/// Reads fall through to `base`; writes are kept in memory.
///
/// Used for dry runs, so that existing sources and manifests on disk are
/// observed without being touched.
pub struct OverlayFiler<'a> {
    base: &'a dyn Filer,
    changes: MemoryFiler,
}

impl<'a> OverlayFiler<'a> {
    pub fn new(base: &'a dyn Filer) -> Self {
        Self {
            base,
            changes: MemoryFiler::new(),
        }
    }

    /// Everything written through this filer.
    pub fn changes(&self) -> &MemoryFiler {
        &self.changes
    }
}

impl Filer for OverlayFiler<'_> {
    fn read_resource(&self, location: Location, relative_name: &str) -> io::Result<Option<String>> {
        match self.changes.get(location, relative_name) {
            Some(contents) => Ok(Some(contents)),
            None => self.base.read_resource(location, relative_name),
        }
    }

    fn write_resource(
        &self,
        location: Location,
        relative_name: &str,
        contents: &str,
    ) -> io::Result<()> {
        self.changes.write_resource(location, relative_name, contents)
    }

    fn source_exists(&self, package: &str, file_name: &str) -> bool {
        self.changes.source_exists(package, file_name) || self.base.source_exists(package, file_name)
    }

    fn create_source_file(
        &self,
        package: &str,
        file_name: &str,
        contents: &str,
        originating: &dyn Element,
    ) -> io::Result<()> {
        if self.base.source_exists(package, file_name) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", source_relative_path(package, file_name)),
            ));
        }
        self.changes
            .create_source_file(package, file_name, contents, originating)
    }

    fn overwrite_source_file(&self, package: &str, file_name: &str, contents: &str) -> io::Result<()> {
        if !self.source_exists(package, file_name) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", source_relative_path(package, file_name)),
            ));
        }
        self.changes.insert(
            Location::SourceOutput,
            source_relative_path(package, file_name),
            contents,
        );
        Ok(())
    }
}
