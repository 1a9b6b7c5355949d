pub mod diagnostic;
pub mod error;
pub mod filer;
pub mod models;
pub mod round;

// Re-export commonly used types
pub use diagnostic::{Diagnostic, DiagnosticKind, Messager};
pub use error::{ApiError, ApiResult};
pub use filer::{Filer, Location};
pub use models::*;
pub use round::RoundEnvironment;
