use picoservice_api::{
    AnnotationMirror, AnnotationValue, Element, ElementKey, ElementKind, Filer, Location,
    RETENTION_ANNOTATION, RoundEnvironment, TARGET_ANNOTATION, qualify,
};
use picoservice_core::filer::MemoryFiler;
use picoservice_core::options::DEFAULT_MARKER_ANNOTATION;
use std::io;
use std::sync::Arc;

#[derive(Debug)]
pub struct MockElement {
    pub kind: ElementKind,
    pub name: String,
    pub parent: Option<Arc<MockElement>>,
    pub annotations: Vec<AnnotationMirror>,
}

impl Element for MockElement {
    fn key(&self) -> ElementKey {
        ElementKey::new(format!("{}:{}", self.kind, self.qualified_name()))
    }

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn simple_name(&self) -> &str {
        &self.name
    }

    fn qualified_name(&self) -> String {
        match &self.parent {
            Some(parent) => qualify(&parent.qualified_name(), &self.name),
            None => self.name.clone(),
        }
    }

    fn enclosing_element(&self) -> Option<Arc<dyn Element>> {
        self.parent.clone().map(|p| p as Arc<dyn Element>)
    }

    fn annotation(&self, annotation_type: &str) -> Option<AnnotationMirror> {
        self.annotations
            .iter()
            .find(|a| a.annotation_type == annotation_type)
            .cloned()
    }
}

pub fn package(name: &str) -> Arc<MockElement> {
    Arc::new(MockElement {
        kind: ElementKind::Package,
        name: name.to_string(),
        parent: None,
        annotations: Vec::new(),
    })
}

pub fn declare(
    parent: &Arc<MockElement>,
    kind: ElementKind,
    name: &str,
    annotations: Vec<AnnotationMirror>,
) -> Arc<MockElement> {
    Arc::new(MockElement {
        kind,
        name: name.to_string(),
        parent: Some(parent.clone()),
        annotations,
    })
}

/// A usage of `annotation` without arguments.
pub fn usage(annotation: &Arc<MockElement>) -> AnnotationMirror {
    AnnotationMirror::new(annotation.qualified_name())
}

/// An annotation type carrying the service meta-annotation.
pub fn marker(
    parent: &Arc<MockElement>,
    name: &str,
    retention: Option<&str>,
    targets: &[&str],
) -> Arc<MockElement> {
    let mut annotations = vec![AnnotationMirror::new(DEFAULT_MARKER_ANNOTATION)];
    if let Some(policy) = retention {
        annotations.push(
            AnnotationMirror::new(RETENTION_ANNOTATION)
                .with_value("value", AnnotationValue::EnumConstant(policy.to_string())),
        );
    }
    annotations.push(AnnotationMirror::new(TARGET_ANNOTATION).with_value(
        "value",
        AnnotationValue::Array(
            targets
                .iter()
                .map(|t| AnnotationValue::EnumConstant(t.to_string()))
                .collect(),
        ),
    ));
    declare(parent, ElementKind::AnnotationType, name, annotations)
}

#[derive(Default)]
pub struct MockRound {
    pub over: bool,
    pub usages: Vec<(Arc<dyn Element>, Vec<Arc<dyn Element>>)>,
}

impl MockRound {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn final_pass() -> Self {
        Self {
            over: true,
            usages: Vec::new(),
        }
    }

    pub fn with(mut self, annotation: &Arc<MockElement>, elements: &[&Arc<MockElement>]) -> Self {
        self.usages.push((
            annotation.clone() as Arc<dyn Element>,
            elements
                .iter()
                .map(|e| (*e).clone() as Arc<dyn Element>)
                .collect(),
        ));
        self
    }
}

impl RoundEnvironment for MockRound {
    fn processing_over(&self) -> bool {
        self.over
    }

    fn annotations(&self) -> Vec<Arc<dyn Element>> {
        self.usages.iter().map(|(a, _)| a.clone()).collect()
    }

    fn elements_annotated_with(&self, annotation: &dyn Element) -> Vec<Arc<dyn Element>> {
        self.usages
            .iter()
            .filter(|(a, _)| a.key() == annotation.key())
            .flat_map(|(_, elements)| elements.iter().cloned())
            .collect()
    }
}

/// Memory filer with switchable failures.
#[derive(Default)]
pub struct FlakyFiler {
    pub inner: MemoryFiler,
    pub fail_sources_for: Vec<String>,
    pub fail_manifest_read: bool,
    pub fail_manifest_write: bool,
}

fn broken(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, format!("{} denied", what))
}

impl Filer for FlakyFiler {
    fn read_resource(&self, location: Location, relative_name: &str) -> io::Result<Option<String>> {
        if self.fail_manifest_read {
            return Err(broken("read"));
        }
        self.inner.read_resource(location, relative_name)
    }

    fn write_resource(&self, location: Location, relative_name: &str, contents: &str) -> io::Result<()> {
        if self.fail_manifest_write {
            return Err(broken("write"));
        }
        self.inner.write_resource(location, relative_name, contents)
    }

    fn source_exists(&self, package: &str, file_name: &str) -> bool {
        self.inner.source_exists(package, file_name)
    }

    fn create_source_file(
        &self,
        package: &str,
        file_name: &str,
        contents: &str,
        originating: &dyn Element,
    ) -> io::Result<()> {
        if self.fail_sources_for.iter().any(|f| f == file_name) {
            return Err(broken(file_name));
        }
        self.inner
            .create_source_file(package, file_name, contents, originating)
    }

    fn overwrite_source_file(&self, package: &str, file_name: &str, contents: &str) -> io::Result<()> {
        if self.fail_sources_for.iter().any(|f| f == file_name) {
            return Err(broken(file_name));
        }
        self.inner.overwrite_source_file(package, file_name, contents)
    }
}
