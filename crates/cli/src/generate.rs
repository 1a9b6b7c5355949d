use clap::Args;
use picoservice_api::Filer;
use picoservice_core::filer::{FsFiler, OverlayFiler};
use picoservice_core::{DiagnosticLog, JavaVersion, ProcessorOptions, RegistrationProcessor};
use picoservice_java::{BuildReport, JavaHost};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Source root to scan. Repeat for several roots; each one is a build pass
    #[arg(long = "source", value_name = "DIR", required = true)]
    pub sources: Vec<PathBuf>,
    /// Directory receiving generated registration sources
    #[arg(long, value_name = "DIR")]
    pub source_output: PathBuf,
    /// Directory receiving the service manifest
    #[arg(long, value_name = "DIR")]
    pub class_output: PathBuf,
    /// Target Java release, e.g. 8, 1.8 or 17
    #[arg(long, value_name = "VERSION")]
    pub java_version: Option<String>,
    /// Fixed @Generated date, for reproducible output
    #[arg(long)]
    pub timestamp: Option<String>,
    /// Meta-annotation that marks service annotations
    #[arg(long, value_name = "FQN")]
    pub marker: Option<String>,
    /// Interface implemented by generated registrations
    #[arg(long, value_name = "FQN")]
    pub registration_interface: Option<String>,
    /// JSON file with processor options
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Print the artifacts instead of writing them
    #[arg(long)]
    pub dry_run: bool,
    /// Print the build report as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Config file, then environment, then flags.
    pub fn options(&self) -> picoservice_core::Result<ProcessorOptions> {
        let base = match &self.config {
            Some(path) => ProcessorOptions::from_json_file(path)?,
            None => ProcessorOptions::default(),
        };
        let mut options = base.with_env();
        if let Some(marker) = &self.marker {
            options.marker_annotation = marker.clone();
        }
        if let Some(interface) = &self.registration_interface {
            options.registration_interface = interface.clone();
        }
        if let Some(version) = &self.java_version {
            options.java_version = JavaVersion::parse(version);
        }
        if let Some(timestamp) = &self.timestamp {
            options.timestamp = Some(timestamp.clone());
        }
        Ok(options)
    }
}

pub fn run(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.options()?;
    let sources = JavaHost::new(args.sources.clone())
        .with_known_types([options.marker_annotation.clone()])
        .load()?;
    let log = DiagnosticLog::new();
    let disk = FsFiler::new(&args.source_output, &args.class_output);

    let report = if args.dry_run {
        let filer = OverlayFiler::new(&disk);
        let report = build(&sources, options, &filer, &log);
        if !args.json {
            for (location, name, contents) in filer.changes().files() {
                println!("--- {:?}: {}", location, name);
                print!("{}", contents);
            }
        }
        report
    } else {
        build(&sources, options, &disk, &log)
    };
    let report = report.with_diagnostics(log.entries());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!(
            "Generated {} registrations from {} files in {} passes",
            report.generated.len(),
            report.files,
            report.passes
        );
        if let Some(manifest) = &report.manifest {
            info!("Manifest {}: {} entries", manifest.path, manifest.entries.len());
        }
    }

    if log.has_errors() {
        return Err(format!("{} error(s) reported", log.error_count()).into());
    }
    Ok(())
}

fn build(
    sources: &picoservice_java::JavaSources,
    options: ProcessorOptions,
    filer: &dyn Filer,
    log: &DiagnosticLog,
) -> BuildReport {
    let mut processor = RegistrationProcessor::new(options, filer, log);
    sources.run(&mut processor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: GenerateArgs,
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("picoservice.json");
        std::fs::write(
            &config,
            r#"{"marker_annotation": "org.acme.Marker", "java_version": 11}"#,
        )
        .unwrap();

        let harness = Harness::parse_from([
            "picoservice",
            "--source",
            "src",
            "--source-output",
            "gen",
            "--class-output",
            "classes",
            "--config",
            config.to_str().unwrap(),
            "--java-version",
            "1.8",
        ]);
        let options = harness.args.options().unwrap();
        assert_eq!(options.marker_annotation, "org.acme.Marker");
        assert_eq!(options.java_version, JavaVersion::LEGACY);
        assert_eq!(harness.args.sources, vec![PathBuf::from("src")]);
    }

    #[test]
    fn test_dry_run_sees_existing_sources_without_touching_them() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let write = |relative: &str, contents: &str| {
            let path = root.join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, contents).unwrap();
        };
        write(
            "src/com/acme/Service.java",
            "package com.acme;\n\
             import de.adito.picoservice.*;\n\
             import java.lang.annotation.*;\n\
             @PicoService @Retention(RetentionPolicy.RUNTIME) @Target(ElementType.TYPE)\n\
             public @interface Service {}\n",
        );
        write("src/com/acme/Widget.java", "package com.acme; @Service class Widget {}");
        write("generated/com/acme/WidgetPicoService.java", "stale");

        let options = ProcessorOptions {
            timestamp: Some("2024-01-01T00:00+0000".to_string()),
            ..ProcessorOptions::default()
        };
        let sources = JavaHost::new([root.join("src")])
            .with_known_types([options.marker_annotation.clone()])
            .load()
            .unwrap();
        let disk = FsFiler::new(root.join("generated"), root.join("classes"));
        let filer = OverlayFiler::new(&disk);
        let log = DiagnosticLog::new();
        let report = build(&sources, options, &filer, &log);

        assert!(!log.has_errors(), "{:?}", log.entries());
        assert_eq!(report.generated.len(), 1);
        assert!(report.generated[0].overwritten);
        assert_eq!(filer.changes().files().len(), 2);
        assert_eq!(
            std::fs::read_to_string(root.join("generated/com/acme/WidgetPicoService.java")).unwrap(),
            "stale"
        );
        assert!(!root.join("classes").exists());
    }
}
