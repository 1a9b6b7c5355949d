use crate::model::JavaElement;
use indexmap::IndexMap;
use picoservice_api::{Element, RoundEnvironment};
use std::sync::Arc;

/// Annotation usages grouped by annotation type.
#[derive(Debug, Default)]
struct Usages {
    annotation: Option<Arc<JavaElement>>,
    elements: Vec<Arc<JavaElement>>,
}

/// One build pass over the sources of a single root.
#[derive(Debug, Default)]
pub struct JavaRound {
    usages: IndexMap<String, Usages>,
    processing_over: bool,
}

impl JavaRound {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pass that tells processors no more sources follow.
    pub fn final_pass() -> Self {
        Self {
            usages: IndexMap::new(),
            processing_over: true,
        }
    }

    pub fn record(&mut self, annotation: &Arc<JavaElement>, element: &Arc<JavaElement>) {
        let usages = self
            .usages
            .entry(annotation.qualified_name())
            .or_default();
        usages.annotation.get_or_insert_with(|| annotation.clone());
        if !usages
            .elements
            .iter()
            .any(|e| Arc::ptr_eq(e, element))
        {
            usages.elements.push(element.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    pub fn annotated_count(&self) -> usize {
        self.usages.values().map(|u| u.elements.len()).sum()
    }
}

impl RoundEnvironment for JavaRound {
    fn processing_over(&self) -> bool {
        self.processing_over
    }

    fn annotations(&self) -> Vec<Arc<dyn Element>> {
        self.usages
            .values()
            .filter_map(|u| u.annotation.clone())
            .map(|a| a as Arc<dyn Element>)
            .collect()
    }

    fn elements_annotated_with(&self, annotation: &dyn Element) -> Vec<Arc<dyn Element>> {
        self.usages
            .get(&annotation.qualified_name())
            .map(|u| {
                u.elements
                    .iter()
                    .map(|e| e.clone() as Arc<dyn Element>)
                    .collect()
            })
            .unwrap_or_default()
    }
}
