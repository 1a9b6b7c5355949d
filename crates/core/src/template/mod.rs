//! Registration source rendering.
//!
//! Template text lives in `registration.java.tmpl` and refers to values by
//! named holes (`{{class_name}}`). Rendering is plain substitution; the only
//! check is that every hole has a value.

use crate::error::TemplateError;
use crate::options::{GENERATOR_NAME, ProcessorOptions};
use once_cell::sync::Lazy;
use picoservice_api::RegistrationDescriptor;
use regex::Regex;
use std::collections::BTreeMap;

static HOLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").expect("hole pattern is valid"));

pub const REGISTRATION_TEMPLATE: Template =
    Template::new(include_str!("registration.java.tmpl"));

pub type TemplateValues = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, Copy)]
pub struct Template {
    text: &'static str,
}

impl Template {
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// Hole names in order of first appearance.
    pub fn holes(&self) -> Vec<&'static str> {
        let mut holes: Vec<&'static str> = Vec::new();
        for cap in HOLE.captures_iter(self.text) {
            if let Some(name) = cap.get(1).map(|m| m.as_str()) {
                if !holes.contains(&name) {
                    holes.push(name);
                }
            }
        }
        holes
    }

    pub fn render(&self, values: &TemplateValues) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.text.len() + 256);
        let mut last = 0;
        for cap in HOLE.captures_iter(self.text) {
            let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            let value = values
                .get(name.as_str())
                .ok_or_else(|| TemplateError::MissingValue(name.as_str().to_string()))?;
            out.push_str(&self.text[last..whole.start()]);
            out.push_str(value);
            last = whole.end();
        }
        out.push_str(&self.text[last..]);
        Ok(out)
    }
}

/// Everything that goes into one registration class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationStub {
    pub package: String,
    pub class_name: String,
    /// Source name of the annotated class, as written in `getAnnotatedClass()`.
    pub annotated_class: String,
    pub timestamp: String,
    pub generated_import: String,
    pub registration_interface: String,
}

impl RegistrationStub {
    pub fn new(
        descriptor: &RegistrationDescriptor,
        options: &ProcessorOptions,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            package: descriptor.package.clone(),
            class_name: descriptor.generated_simple_name.clone(),
            annotated_class: descriptor.annotated_qualified_name(),
            timestamp: timestamp.into(),
            generated_import: options.java_version.generated_import().to_string(),
            registration_interface: options.registration_interface.clone(),
        }
    }

    pub fn values(&self) -> TemplateValues {
        let package_declaration = if self.package.is_empty() {
            String::new()
        } else {
            format!("package {};\n\n", self.package)
        };
        let interface_simple = self
            .registration_interface
            .rsplit('.')
            .next()
            .unwrap_or(&self.registration_interface)
            .to_string();

        let mut values = TemplateValues::new();
        values.insert("package_declaration", package_declaration);
        values.insert("registration_interface", self.registration_interface.clone());
        values.insert("registration_interface_simple", interface_simple);
        values.insert("generated_import", self.generated_import.clone());
        values.insert("generator", GENERATOR_NAME.to_string());
        values.insert("date", self.timestamp.clone());
        values.insert("class_name", self.class_name.clone());
        values.insert("annotated_class", self.annotated_class.clone());
        values
    }

    pub fn render(&self) -> Result<String, TemplateError> {
        REGISTRATION_TEMPLATE.render(&self.values())
    }
}
