//! Registration aggregator.
//!
//! A [`RegistrationProcessor`] lives for exactly one build. The host calls
//! [`RegistrationProcessor::process`] once per pass; non-final passes only
//! collect annotated elements, the final pass generates one registration
//! class per collected element and merges the service manifest once.

use crate::error::{ProcessorError, Result};
use crate::manifest::{ManifestMerger, ManifestUpdate};
use crate::naming::ElementNamer;
use crate::options::ProcessorOptions;
use crate::template::RegistrationStub;
use crate::validation::MarkerValidator;
use indexmap::IndexMap;
use picoservice_api::{
    DiagnosticKind, Element, ElementKey, Filer, Messager, RegistrationDescriptor, RoundEnvironment,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregatorState {
    Accumulating,
    /// Terminal; entered on the final pass.
    Finalizing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedRegistration {
    pub element: ElementKey,
    pub descriptor: RegistrationDescriptor,
    /// The source file existed and was rewritten in place.
    pub overwritten: bool,
}

pub struct RegistrationProcessor<'a> {
    options: ProcessorOptions,
    namer: ElementNamer,
    validator: MarkerValidator,
    filer: &'a dyn Filer,
    messager: &'a dyn Messager,
    state: AggregatorState,
    annotated: IndexMap<ElementKey, Arc<dyn Element>>,
    generated: Vec<GeneratedRegistration>,
    failed: Vec<ElementKey>,
    manifest: Option<ManifestUpdate>,
    passes: usize,
}

impl<'a> RegistrationProcessor<'a> {
    pub fn new(options: ProcessorOptions, filer: &'a dyn Filer, messager: &'a dyn Messager) -> Self {
        Self {
            namer: ElementNamer::new(options.postfix.clone()),
            validator: MarkerValidator::new(options.marker_annotation.clone()),
            options,
            filer,
            messager,
            state: AggregatorState::Accumulating,
            annotated: IndexMap::new(),
            generated: Vec::new(),
            failed: Vec::new(),
            manifest: None,
            passes: 0,
        }
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Elements collected so far, in discovery order. Empty once generation ran.
    pub fn accumulated(&self) -> impl Iterator<Item = &Arc<dyn Element>> {
        self.annotated.values()
    }

    pub fn generated(&self) -> &[GeneratedRegistration] {
        &self.generated
    }

    /// Elements whose registration could not be generated.
    pub fn failed(&self) -> &[ElementKey] {
        &self.failed
    }

    pub fn manifest(&self) -> Option<&ManifestUpdate> {
        self.manifest.as_ref()
    }

    /// Handles one build pass.
    ///
    /// Always returns `false`: the annotations are never claimed, so other
    /// processors still observe them.
    pub fn process(&mut self, round: &dyn RoundEnvironment) -> bool {
        if self.state == AggregatorState::Finalizing {
            warn!("Ignoring build pass received after the final pass");
            return false;
        }
        self.passes += 1;

        if round.processing_over() {
            self.state = AggregatorState::Finalizing;
            if !self.annotated.is_empty() {
                self.generate_registrations();
            } else {
                debug!("No annotated elements collected, nothing to generate");
            }
        } else {
            self.collect(round);
        }
        false
    }

    fn collect(&mut self, round: &dyn RoundEnvironment) {
        let before = self.annotated.len();
        for annotation in round.annotations() {
            if !self.validator.is_service_marker(annotation.as_ref()) {
                continue;
            }
            if !self.validator.is_valid(annotation.as_ref(), self.messager) {
                continue;
            }
            for element in round.elements_annotated_with(annotation.as_ref()) {
                if !element.kind().is_type() {
                    self.messager.print_message(
                        DiagnosticKind::Warning,
                        &format!(
                            "Only types can be registered, found {} annotated with {}",
                            element.kind(),
                            annotation.qualified_name()
                        ),
                        Some(element.as_ref()),
                    );
                    continue;
                }
                self.annotated.entry(element.key()).or_insert(element);
            }
        }
        info!(
            "Pass {}: {} new annotated elements, {} total",
            self.passes,
            self.annotated.len() - before,
            self.annotated.len()
        );
    }

    fn generate_registrations(&mut self) {
        let timestamp = self.options.render_timestamp();
        let elements = std::mem::take(&mut self.annotated);

        for (key, element) in elements {
            match self.generate(element.as_ref(), &timestamp) {
                Ok(registration) => {
                    debug!(
                        "Generated {} for {}",
                        registration.descriptor.fully_qualified_name, key
                    );
                    self.generated.push(registration);
                }
                Err(e) => {
                    self.messager.print_message(
                        DiagnosticKind::Error,
                        &e.to_string(),
                        Some(element.as_ref()),
                    );
                    self.failed.push(key);
                }
            }
        }

        let merger = ManifestMerger::new(self.filer, self.messager, self.options.manifest_path());
        let update = merger.merge(
            self.generated
                .iter()
                .map(|g| g.descriptor.fully_qualified_name.clone()),
        );
        self.manifest = Some(update);
    }

    fn generate(&self, element: &dyn Element, timestamp: &str) -> Result<GeneratedRegistration> {
        let descriptor = self.namer.describe(element)?;
        if self
            .generated
            .iter()
            .any(|g| g.descriptor.fully_qualified_name == descriptor.fully_qualified_name)
        {
            return Err(ProcessorError::DuplicateRegistration {
                fqn: descriptor.fully_qualified_name,
            });
        }

        let source = RegistrationStub::new(&descriptor, &self.options, timestamp).render()?;
        let file_name = descriptor.source_file_name();
        let overwritten = self.filer.source_exists(&descriptor.package, &file_name);
        if overwritten {
            self.filer
                .overwrite_source_file(&descriptor.package, &file_name, &source)?;
        } else {
            self.filer
                .create_source_file(&descriptor.package, &file_name, &source, element)?;
        }

        Ok(GeneratedRegistration {
            element: element.key(),
            descriptor,
            overwritten,
        })
    }
}
