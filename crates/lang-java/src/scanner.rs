use crate::error::Result;
use crate::parser::{CompilationUnit, JavaSourceParser};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub struct SourceScanner;

impl SourceScanner {
    pub fn is_java_source(path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some("java")
    }

    /// `.java` files below `root`, honouring ignore files, in path order.
    pub fn collect_paths(root: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = WalkBuilder::new(root)
            .build()
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let path = entry.path();
                if path.is_file() && Self::is_java_source(path) {
                    return Some(path.to_path_buf());
                }
                None
            })
            .collect();
        paths.sort();
        paths
    }

    /// Parses every file in parallel. Output order follows `paths`.
    pub fn parse_all(paths: &[PathBuf]) -> Result<Vec<CompilationUnit>> {
        paths
            .par_iter()
            .map(|path| JavaSourceParser::new()?.parse_file(path))
            .collect()
    }
}
