use picoservice_api::{
    DiagnosticKind, Element, ElementType, Messager, RETENTION_ANNOTATION, RetentionPolicy,
    TARGET_ANNOTATION,
};
use tracing::debug;

/// Decides whether an annotation type may act as a service marker.
#[derive(Debug, Clone)]
pub struct MarkerValidator {
    marker_annotation: String,
}

impl MarkerValidator {
    pub fn new(marker_annotation: impl Into<String>) -> Self {
        Self {
            marker_annotation: marker_annotation.into(),
        }
    }

    /// Whether the annotation type carries the service meta-annotation.
    pub fn is_service_marker(&self, annotation: &dyn Element) -> bool {
        annotation.annotation(&self.marker_annotation).is_some()
    }

    /// Checks retention and target of a marker annotation type.
    ///
    /// Failures are reported as mandatory warnings attributed to the
    /// annotation type; the first failing check decides.
    pub fn is_valid(&self, annotation: &dyn Element, messager: &dyn Messager) -> bool {
        let retention = annotation
            .annotation(RETENTION_ANNOTATION)
            .and_then(|r| r.value().and_then(|v| v.as_enum_constant()).map(str::to_string))
            .and_then(|name| name.parse::<RetentionPolicy>().ok());
        if retention != Some(RetentionPolicy::Runtime) {
            warn(messager, "Retention should be RUNTIME", annotation);
            return false;
        }

        let targets = annotation
            .annotation(TARGET_ANNOTATION)
            .and_then(|t| t.value().cloned());
        let targets = match &targets {
            Some(value) => value.elements(),
            None => Vec::new(),
        };
        if targets.is_empty() {
            warn(messager, "Target has to be defined", annotation);
            return false;
        }

        for target in targets {
            let element_type = target.as_enum_constant().map(ElementType::parse);
            if element_type != Some(ElementType::Type) {
                warn(messager, &format!("Unsupported type: {}", target), annotation);
                return false;
            }
        }

        debug!("{} is a valid service marker", annotation.qualified_name());
        true
    }
}

fn warn(messager: &dyn Messager, message: &str, element: &dyn Element) {
    messager.print_message(DiagnosticKind::MandatoryWarning, message, Some(element));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticLog;
    use picoservice_api::{AnnotationMirror, AnnotationValue, ElementKey, ElementKind};
    use std::sync::Arc;

    #[derive(Debug)]
    struct AnnotationType(Vec<AnnotationMirror>);

    impl Element for AnnotationType {
        fn key(&self) -> ElementKey {
            ElementKey::new("com.acme.Service")
        }
        fn kind(&self) -> ElementKind {
            ElementKind::AnnotationType
        }
        fn simple_name(&self) -> &str {
            "Service"
        }
        fn qualified_name(&self) -> String {
            "com.acme.Service".to_string()
        }
        fn enclosing_element(&self) -> Option<Arc<dyn Element>> {
            None
        }
        fn annotation(&self, annotation_type: &str) -> Option<AnnotationMirror> {
            self.0
                .iter()
                .find(|a| a.annotation_type == annotation_type)
                .cloned()
        }
    }

    fn retention(policy: &str) -> AnnotationMirror {
        AnnotationMirror::new(RETENTION_ANNOTATION)
            .with_value("value", AnnotationValue::EnumConstant(policy.to_string()))
    }

    fn target(types: &[&str]) -> AnnotationMirror {
        AnnotationMirror::new(TARGET_ANNOTATION).with_value(
            "value",
            AnnotationValue::Array(
                types
                    .iter()
                    .map(|t| AnnotationValue::EnumConstant(t.to_string()))
                    .collect(),
            ),
        )
    }

    fn check(annotations: Vec<AnnotationMirror>) -> (bool, Vec<String>) {
        let log = DiagnosticLog::new();
        let valid = MarkerValidator::new("x.PicoService").is_valid(&AnnotationType(annotations), &log);
        let messages = log.entries().into_iter().map(|d| d.message).collect();
        (valid, messages)
    }

    #[test]
    fn test_runtime_type_marker_is_valid() {
        let (valid, messages) = check(vec![retention("RUNTIME"), target(&["TYPE"])]);
        assert!(valid);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_missing_or_wrong_retention() {
        assert_eq!(
            check(vec![target(&["TYPE"])]),
            (false, vec!["Retention should be RUNTIME".to_string()])
        );
        assert_eq!(
            check(vec![retention("CLASS"), target(&["TYPE"])]),
            (false, vec!["Retention should be RUNTIME".to_string()])
        );
    }

    #[test]
    fn test_missing_or_empty_target() {
        assert_eq!(
            check(vec![retention("RUNTIME")]),
            (false, vec!["Target has to be defined".to_string()])
        );
        assert_eq!(
            check(vec![retention("RUNTIME"), target(&[])]),
            (false, vec!["Target has to be defined".to_string()])
        );
    }

    #[test]
    fn test_non_type_target_is_rejected() {
        assert_eq!(
            check(vec![retention("RUNTIME"), target(&["TYPE", "FIELD"])]),
            (false, vec!["Unsupported type: FIELD".to_string()])
        );
    }

    #[test]
    fn test_single_target_without_array() {
        let single = AnnotationMirror::new(TARGET_ANNOTATION)
            .with_value("value", AnnotationValue::EnumConstant("TYPE".to_string()));
        assert!(check(vec![retention("RUNTIME"), single]).0);
    }

    #[test]
    fn test_warnings_are_mandatory_not_errors() {
        let log = DiagnosticLog::new();
        MarkerValidator::new("x.PicoService").is_valid(&AnnotationType(vec![]), &log);
        assert!(!log.has_errors());
        assert_eq!(log.of_kind(DiagnosticKind::MandatoryWarning).len(), 1);
    }
}
