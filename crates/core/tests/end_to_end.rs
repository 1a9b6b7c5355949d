#[allow(dead_code)]
mod common;

use common::{MockRound, declare, marker, package, usage};
use picoservice_api::ElementKind;
use picoservice_core::filer::FsFiler;
use picoservice_core::{DiagnosticLog, JavaVersion, ProcessorOptions, RegistrationProcessor};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn build(root: &Path, java_version: JavaVersion) -> DiagnosticLog {
    let pkg = package("com.acme");
    let service = marker(&pkg, "Service", Some("RUNTIME"), &["TYPE"]);
    let widget = declare(&pkg, ElementKind::Class, "Widget", vec![usage(&service)]);

    let filer = FsFiler::new(root.join("generated"), root.join("classes"));
    let log = DiagnosticLog::new();
    let options = ProcessorOptions {
        java_version,
        timestamp: Some("2024-03-01T12:30+0100".to_string()),
        ..ProcessorOptions::default()
    };
    let mut processor = RegistrationProcessor::new(options, &filer, &log);
    processor.process(&MockRound::pass().with(&service, &[&widget]));
    processor.process(&MockRound::final_pass());
    log
}

#[test]
fn test_two_pass_build_generates_source_and_manifest() {
    let dir = tempdir().unwrap();
    let log = build(dir.path(), JavaVersion(11));
    assert!(!log.has_errors());

    let source =
        fs::read_to_string(dir.path().join("generated/com/acme/WidgetPicoService.java")).unwrap();
    assert!(source.starts_with("package com.acme;"));
    assert!(source.contains("public class WidgetPicoService implements IPicoRegistration"));
    assert!(source.contains("return com.acme.Widget.class;"));
    assert!(source.contains("import javax.annotation.processing.Generated;"));
    assert!(source.contains("date = \"2024-03-01T12:30+0100\""));

    let manifest = fs::read_to_string(
        dir.path()
            .join("classes/META-INF/services/de.adito.picoservice.IPicoRegistration"),
    )
    .unwrap();
    assert_eq!(manifest, "com.acme.WidgetPicoService\n");
}

#[test]
fn test_legacy_toolchain_uses_legacy_import() {
    let dir = tempdir().unwrap();
    build(dir.path(), JavaVersion::parse("1.8"));
    let source =
        fs::read_to_string(dir.path().join("generated/com/acme/WidgetPicoService.java")).unwrap();
    assert!(source.contains("import javax.annotation.Generated;"));
}

#[test]
fn test_pre_existing_manifest_is_merged() {
    let dir = tempdir().unwrap();
    let services = dir.path().join("classes/META-INF/services");
    fs::create_dir_all(&services).unwrap();
    fs::write(
        services.join("de.adito.picoservice.IPicoRegistration"),
        "com.acme.OldPicoService\n",
    )
    .unwrap();

    build(dir.path(), JavaVersion(17));

    let manifest =
        fs::read_to_string(services.join("de.adito.picoservice.IPicoRegistration")).unwrap();
    assert_eq!(
        manifest,
        "com.acme.OldPicoService\ncom.acme.WidgetPicoService\n"
    );
}

#[test]
fn test_rebuild_is_byte_identical() {
    let dir = tempdir().unwrap();
    build(dir.path(), JavaVersion(17));
    let source_path = dir.path().join("generated/com/acme/WidgetPicoService.java");
    let manifest_path = dir
        .path()
        .join("classes/META-INF/services/de.adito.picoservice.IPicoRegistration");
    let first_source = fs::read(&source_path).unwrap();
    let first_manifest = fs::read(&manifest_path).unwrap();

    let log = build(dir.path(), JavaVersion(17));

    assert!(!log.has_errors(), "rebuild must overwrite in place");
    assert_eq!(fs::read(&source_path).unwrap(), first_source);
    assert_eq!(fs::read(&manifest_path).unwrap(), first_manifest);
}
