use super::source_relative_path;
use picoservice_api::{Element, Filer, Location};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;

/// In-memory artifact store, used for dry runs.
#[derive(Debug, Default)]
pub struct MemoryFiler {
    files: RefCell<BTreeMap<(Location, String), String>>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, location: Location, relative_name: impl Into<String>, contents: impl Into<String>) {
        self.files
            .borrow_mut()
            .insert((location, relative_name.into()), contents.into());
    }

    pub fn get(&self, location: Location, relative_name: &str) -> Option<String> {
        self.files
            .borrow()
            .get(&(location, relative_name.to_string()))
            .cloned()
    }

    /// All stored artifacts, ordered by location and path.
    pub fn files(&self) -> Vec<(Location, String, String)> {
        self.files
            .borrow()
            .iter()
            .map(|((location, path), contents)| (*location, path.clone(), contents.clone()))
            .collect()
    }
}

impl Filer for MemoryFiler {
    fn read_resource(&self, location: Location, relative_name: &str) -> io::Result<Option<String>> {
        Ok(self.get(location, relative_name))
    }

    fn write_resource(
        &self,
        location: Location,
        relative_name: &str,
        contents: &str,
    ) -> io::Result<()> {
        self.insert(location, relative_name, contents);
        Ok(())
    }

    fn source_exists(&self, package: &str, file_name: &str) -> bool {
        self.get(
            Location::SourceOutput,
            &source_relative_path(package, file_name),
        )
        .is_some()
    }

    fn create_source_file(
        &self,
        package: &str,
        file_name: &str,
        contents: &str,
        _originating: &dyn Element,
    ) -> io::Result<()> {
        let path = source_relative_path(package, file_name);
        let mut files = self.files.borrow_mut();
        let key = (Location::SourceOutput, path);
        if files.contains_key(&key) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", key.1),
            ));
        }
        files.insert(key, contents.to_string());
        Ok(())
    }

    fn overwrite_source_file(&self, package: &str, file_name: &str, contents: &str) -> io::Result<()> {
        let path = source_relative_path(package, file_name);
        let mut files = self.files.borrow_mut();
        match files.get_mut(&(Location::SourceOutput, path.clone())) {
            Some(existing) => {
                *existing = contents.to_string();
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path),
            )),
        }
    }
}
