//! Java source host for the registration processor.
//!
//! Parses `.java` files with tree-sitter, builds the element graph the
//! processor inspects and runs one build pass per source root.

pub mod error;
pub mod host;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod round;
pub mod scanner;

pub use error::{JavaHostError, Result};
pub use host::{BuildReport, JavaHost, JavaSources};
pub use model::JavaElement;
pub use round::JavaRound;
