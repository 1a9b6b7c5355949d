pub mod annotation;
pub mod element;
pub mod registration;

pub use annotation::*;
pub use element::*;
pub use registration::*;
