use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("Registration {fqn} already generated for another element")]
    DuplicateRegistration { fqn: String },
}

/// Failure to derive names from an element's enclosing chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("Element type not supported: {element} is enclosed by a {kind}")]
    UnsupportedEnclosing { element: String, kind: String },
    #[error("Element type not supported: {element} has no enclosing package")]
    Detached { element: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("No value supplied for template hole `{0}`")]
    MissingValue(String),
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
