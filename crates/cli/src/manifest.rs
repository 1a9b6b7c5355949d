use picoservice_core::filer::FsFiler;
use picoservice_core::manifest::ManifestMerger;
use picoservice_core::{DiagnosticLog, ProcessorOptions};
use std::path::PathBuf;
use tracing::info;

pub fn run(
    class_output: PathBuf,
    add: Vec<String>,
    registration_interface: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ProcessorOptions::default().with_env();
    if let Some(interface) = registration_interface {
        options.registration_interface = interface;
    }

    // Only the class output is touched here.
    let filer = FsFiler::new(&class_output, &class_output);
    let log = DiagnosticLog::new();
    let merger = ManifestMerger::new(&filer, &log, options.manifest_path());

    if add.is_empty() {
        for entry in merger.read_existing() {
            println!("{}", entry);
        }
    } else {
        let update = merger.merge(add);
        info!(
            "{}: {} entries ({} before)",
            update.path,
            update.entries.len(),
            update.previous
        );
    }

    if log.has_errors() {
        return Err(format!("{} error(s) reported", log.error_count()).into());
    }
    Ok(())
}
