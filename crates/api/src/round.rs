use crate::models::Element;
use std::sync::Arc;

/// What the host toolchain exposes for one build pass.
pub trait RoundEnvironment {
    /// `true` on the final pass, after which no further passes follow.
    fn processing_over(&self) -> bool;

    /// Annotation types actually used by the elements of this pass.
    fn annotations(&self) -> Vec<Arc<dyn Element>>;

    /// Elements of this pass carrying the given annotation type.
    fn elements_annotated_with(&self, annotation: &dyn Element) -> Vec<Arc<dyn Element>>;
}
