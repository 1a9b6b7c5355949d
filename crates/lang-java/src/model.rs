use picoservice_api::{AnnotationMirror, Element, ElementKey, ElementKind, qualify};
use std::path::PathBuf;
use std::sync::Arc;

/// Where a declaration sits in the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    pub path: PathBuf,
    pub line: usize,
    pub offset: usize,
}

/// A package or declaration from parsed Java sources.
#[derive(Debug)]
pub struct JavaElement {
    kind: ElementKind,
    name: String,
    qualified_name: String,
    enclosing: Option<Arc<JavaElement>>,
    annotations: Vec<AnnotationMirror>,
    position: Option<SourcePosition>,
}

impl JavaElement {
    pub fn package(name: &str) -> Arc<Self> {
        Arc::new(Self {
            kind: ElementKind::Package,
            name: name.rsplit('.').next().unwrap_or_default().to_string(),
            qualified_name: name.to_string(),
            enclosing: None,
            annotations: Vec::new(),
            position: None,
        })
    }

    pub fn declaration(
        enclosing: &Arc<JavaElement>,
        kind: ElementKind,
        name: &str,
        annotations: Vec<AnnotationMirror>,
        position: SourcePosition,
    ) -> Arc<Self> {
        Arc::new(Self {
            kind,
            name: name.to_string(),
            qualified_name: qualify(&enclosing.qualified_name, name),
            enclosing: Some(enclosing.clone()),
            annotations,
            position: Some(position),
        })
    }

    pub fn annotations(&self) -> &[AnnotationMirror] {
        &self.annotations
    }
}

impl Element for JavaElement {
    fn key(&self) -> ElementKey {
        match &self.position {
            Some(p) => ElementKey::new(format!("{}@{}", p.path.display(), p.offset)),
            None => ElementKey::new(format!("package:{}", self.qualified_name)),
        }
    }

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn simple_name(&self) -> &str {
        &self.name
    }

    fn qualified_name(&self) -> String {
        self.qualified_name.clone()
    }

    fn enclosing_element(&self) -> Option<Arc<dyn Element>> {
        self.enclosing.clone().map(|e| e as Arc<dyn Element>)
    }

    fn annotation(&self, annotation_type: &str) -> Option<AnnotationMirror> {
        self.annotations
            .iter()
            .find(|a| a.annotation_type == annotation_type)
            .cloned()
    }

    fn location(&self) -> Option<String> {
        self.position
            .as_ref()
            .map(|p| format!("{}:{}", p.path.display(), p.line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_qualified_names() {
        let pkg = JavaElement::package("com.acme");
        let position = |line| SourcePosition {
            path: PathBuf::from("Widget.java"),
            line,
            offset: line * 10,
        };
        let outer = JavaElement::declaration(&pkg, ElementKind::Class, "Outer", vec![], position(1));
        let inner =
            JavaElement::declaration(&outer, ElementKind::Class, "Inner", vec![], position(2));

        assert_eq!(pkg.simple_name(), "acme");
        assert_eq!(inner.qualified_name(), "com.acme.Outer.Inner");
        assert_eq!(inner.location().as_deref(), Some("Widget.java:2"));
        assert_ne!(inner.key(), outer.key());
        assert_eq!(
            inner.enclosing_element().unwrap().qualified_name(),
            "com.acme.Outer"
        );
    }

    #[test]
    fn test_unnamed_package() {
        let pkg = JavaElement::package("");
        assert_eq!(pkg.simple_name(), "");
        assert_eq!(pkg.qualified_name(), "");
        assert_eq!(pkg.key().as_str(), "package:");
    }
}
