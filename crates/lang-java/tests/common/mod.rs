use picoservice_core::filer::FsFiler;
use picoservice_core::{DiagnosticLog, ProcessorOptions, RegistrationProcessor};
use picoservice_java::{BuildReport, JavaHost};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MANIFEST: &str = "classes/META-INF/services/de.adito.picoservice.IPicoRegistration";

pub const SERVICE_ANNOTATION: &str = "package com.acme;\n\
import de.adito.picoservice.PicoService;\n\
import java.lang.annotation.*;\n\
\n\
@PicoService\n\
@Retention(RetentionPolicy.RUNTIME)\n\
@Target(ElementType.TYPE)\n\
public @interface Service {}\n";

/// A throwaway project with `src/` as source root and `generated/` and
/// `classes/` as outputs.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, contents: &str) -> &Self {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root().join(relative).exists()
    }

    pub fn build(&self, roots: &[&str]) -> (BuildReport, DiagnosticLog) {
        let roots: Vec<PathBuf> = roots.iter().map(|r| self.root().join(r)).collect();
        let filer = FsFiler::new(self.root().join("generated"), self.root().join("classes"));
        let log = DiagnosticLog::new();
        let options = ProcessorOptions {
            timestamp: Some("2024-03-01T12:30+0100".to_string()),
            ..ProcessorOptions::default()
        };
        let report = {
            let sources = JavaHost::new(roots)
                .with_known_types([options.marker_annotation.clone()])
                .load()
                .unwrap();
            let mut processor = RegistrationProcessor::new(options, &filer, &log);
            sources.run(&mut processor)
        };
        (report, log)
    }
}
