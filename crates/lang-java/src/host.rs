//! Drives a [`RegistrationProcessor`] over Java source trees.
//!
//! Every source root becomes one build pass, followed by the final pass.
//! All roots are parsed before the first pass runs so annotation types
//! declared in a later root still resolve for usages in an earlier one.

use crate::error::{JavaHostError, Result};
use crate::model::{JavaElement, SourcePosition};
use crate::parser::{CompilationUnit, Declaration};
use crate::resolver::ImportScope;
use crate::round::JavaRound;
use crate::scanner::SourceScanner;
use picoservice_api::{AnnotationMirror, Diagnostic, Element, ElementKey, ElementKind};
use picoservice_core::manifest::ManifestUpdate;
use picoservice_core::{GeneratedRegistration, RegistrationProcessor};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of one build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub roots: Vec<PathBuf>,
    pub files: usize,
    pub passes: usize,
    pub generated: Vec<GeneratedRegistration>,
    pub failed: Vec<ElementKey>,
    pub manifest: Option<ManifestUpdate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

pub struct JavaHost {
    roots: Vec<PathBuf>,
    known_types: HashSet<String>,
}

impl JavaHost {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            known_types: HashSet::new(),
        }
    }

    /// Types that exist outside the sources, e.g. the service marker from a
    /// library. On-demand imports resolve to them.
    pub fn with_known_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Scans and parses every root, then resolves annotations into passes.
    pub fn load(&self) -> Result<JavaSources> {
        let start = Instant::now();
        let mut parsed = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            if !root.is_dir() {
                return Err(JavaHostError::MissingRoot(root.clone()));
            }
            let paths = SourceScanner::collect_paths(root);
            debug!("Found {} Java files under {}", paths.len(), root.display());
            parsed.push(SourceScanner::parse_all(&paths)?);
        }

        let declared: HashSet<String> = parsed
            .iter()
            .flatten()
            .flat_map(CompilationUnit::declared_type_names)
            .collect();

        let mut graph = ElementGraph::default();
        let annotated: Vec<Vec<Arc<JavaElement>>> = parsed
            .iter()
            .map(|units| {
                let mut annotated = Vec::new();
                for unit in units {
                    graph.add_unit(unit, &declared, &self.known_types, &mut annotated);
                }
                annotated
            })
            .collect();

        let rounds: Vec<JavaRound> = annotated
            .iter()
            .map(|elements| graph.round_for(elements))
            .collect();

        let files = parsed.iter().map(Vec::len).sum();
        info!(
            "Loaded {} files, {} types from {} roots in {:?}",
            files,
            graph.types.len(),
            self.roots.len(),
            start.elapsed()
        );

        Ok(JavaSources {
            roots: self.roots.clone(),
            rounds,
            files,
        })
    }
}

/// Parsed sources, one pass per root.
pub struct JavaSources {
    roots: Vec<PathBuf>,
    rounds: Vec<JavaRound>,
    files: usize,
}

impl JavaSources {
    pub fn rounds(&self) -> &[JavaRound] {
        &self.rounds
    }

    pub fn files(&self) -> usize {
        self.files
    }

    /// Feeds every pass and then the final pass to `processor`.
    pub fn run(&self, processor: &mut RegistrationProcessor<'_>) -> BuildReport {
        for round in &self.rounds {
            processor.process(round);
        }
        processor.process(&JavaRound::final_pass());

        BuildReport {
            roots: self.roots.clone(),
            files: self.files,
            passes: processor.passes(),
            generated: processor.generated().to_vec(),
            failed: processor.failed().to_vec(),
            manifest: processor.manifest().cloned(),
            diagnostics: Vec::new(),
        }
    }
}

#[derive(Default)]
struct ElementGraph {
    packages: HashMap<String, Arc<JavaElement>>,
    /// Member types by fully qualified name.
    types: HashMap<String, Arc<JavaElement>>,
}

impl ElementGraph {
    fn add_unit(
        &mut self,
        unit: &CompilationUnit,
        declared: &HashSet<String>,
        known_types: &HashSet<String>,
        annotated: &mut Vec<Arc<JavaElement>>,
    ) {
        let package = self
            .packages
            .entry(unit.package.clone())
            .or_insert_with(|| JavaElement::package(&unit.package))
            .clone();
        let scope =
            ImportScope::new(&unit.package, &unit.imports, declared).with_external(known_types);

        for decl in &unit.types {
            self.add_declaration(unit, &scope, &package, decl, true, annotated);
        }
    }

    fn add_declaration(
        &mut self,
        unit: &CompilationUnit,
        scope: &ImportScope<'_>,
        enclosing: &Arc<JavaElement>,
        decl: &Declaration,
        member: bool,
        annotated: &mut Vec<Arc<JavaElement>>,
    ) {
        let mirrors: Vec<AnnotationMirror> = decl
            .annotations
            .iter()
            .map(|raw| AnnotationMirror {
                annotation_type: scope.resolve(&raw.name),
                values: raw.values.clone(),
            })
            .collect();
        let position = SourcePosition {
            path: unit.path.clone(),
            line: decl.line,
            offset: decl.offset,
        };
        let element = JavaElement::declaration(enclosing, decl.kind, &decl.name, mirrors, position);

        let member = member && decl.is_type();
        if member {
            self.types.insert(element.qualified_name(), element.clone());
        }
        if !element.annotations().is_empty() {
            annotated.push(element.clone());
        }
        for child in &decl.members {
            self.add_declaration(unit, scope, &element, child, member, annotated);
        }
    }

    fn round_for(&self, annotated: &[Arc<JavaElement>]) -> JavaRound {
        let mut round = JavaRound::new();
        for element in annotated {
            for mirror in element.annotations() {
                match self.types.get(&mirror.annotation_type) {
                    Some(annotation) if annotation.kind() == ElementKind::AnnotationType => {
                        round.record(annotation, element);
                    }
                    _ => debug!(
                        "{} is not declared in the sources, skipping usage on {}",
                        mirror.annotation_type,
                        element.qualified_name()
                    ),
                }
            }
        }
        round
    }
}
