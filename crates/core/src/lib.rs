pub mod diagnostics;
pub mod error;
pub mod filer;
pub mod logging;
pub mod manifest;
pub mod naming;
pub mod options;
pub mod processor;
pub mod template;
pub mod validation;

pub use diagnostics::DiagnosticLog;
pub use error::{ProcessorError, Result};
pub use options::{JavaVersion, ProcessorOptions};
pub use processor::{AggregatorState, GeneratedRegistration, RegistrationProcessor};
