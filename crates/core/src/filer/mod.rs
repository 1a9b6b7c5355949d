mod fs;
mod memory;
mod overlay;

pub use fs::FsFiler;
pub use memory::MemoryFiler;
pub use overlay::OverlayFiler;

/// `/`-separated directory of a package below an output root.
pub fn package_dir(package: &str) -> String {
    package.replace('.', "/")
}

pub fn source_relative_path(package: &str, file_name: &str) -> String {
    if package.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", package_dir(package), file_name)
    }
}
