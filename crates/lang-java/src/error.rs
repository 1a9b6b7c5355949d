use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JavaHostError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load Java grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("Parsing error: {}", .0.display())]
    Parse(PathBuf),
    #[error("Source root does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
}

pub type Result<T> = std::result::Result<T, JavaHostError>;
