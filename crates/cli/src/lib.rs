pub mod generate;
pub mod manifest;
pub mod template;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "picoservice",
    version,
    about = "Generates service registrations for annotated Java types",
    long_about = "Scans Java sources for types annotated with a service marker annotation, \
                  generates one registration class per type and lists them in a \
                  META-INF/services manifest so they can be discovered at runtime."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a build over one or more source roots
    #[command(
        long_about = "Parses every .java file under the given source roots. Each root is one \
                      build pass, followed by a final pass that writes the registration sources \
                      and merges the service manifest."
    )]
    Generate(generate::GenerateArgs),
    /// Print the registration class generated for a single type
    Template {
        /// Package of the annotated type; empty for the unnamed package
        #[arg(long, default_value = "")]
        package: String,
        /// Fully qualified source name of the annotated type, e.g. com.acme.Outer.Inner
        #[arg(long, value_name = "FQN")]
        annotated_class: String,
        /// Name of the generated class. Derived from the annotated type when omitted
        #[arg(long)]
        class_name: Option<String>,
        /// Target Java release, decides which @Generated is imported
        #[arg(long, value_name = "VERSION")]
        java_version: Option<String>,
        /// Value written to @Generated(date = ...)
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Print or extend the service manifest in a class output directory
    Manifest {
        #[arg(long, value_name = "DIR")]
        class_output: PathBuf,
        /// Registration classes to merge into the manifest
        #[arg(long, value_name = "FQN")]
        add: Vec<String>,
        /// Service interface naming the manifest file
        #[arg(long, value_name = "FQN")]
        registration_interface: Option<String>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Generate(_) => "generate",
        _ => "cli",
    };
    let _guard = picoservice_core::logging::init_logging(component, true);

    match cli.command {
        Commands::Generate(args) => generate::run(args),
        Commands::Template {
            package,
            annotated_class,
            class_name,
            java_version,
            timestamp,
        } => template::run(package, annotated_class, class_name, java_version, timestamp),
        Commands::Manifest {
            class_output,
            add,
            registration_interface,
        } => manifest::run(class_output, add, registration_interface),
    }
}
