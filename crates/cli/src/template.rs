use picoservice_core::naming::ElementNamer;
use picoservice_core::template::RegistrationStub;
use picoservice_core::{JavaVersion, ProcessorOptions};

/// Package-relative part of `annotated_class`.
fn relative_name<'a>(package: &str, annotated_class: &'a str) -> &'a str {
    if package.is_empty() {
        return annotated_class;
    }
    annotated_class
        .strip_prefix(package)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(annotated_class)
}

pub fn stub(
    package: String,
    annotated_class: String,
    class_name: Option<String>,
    options: &ProcessorOptions,
) -> RegistrationStub {
    let class_name = class_name.unwrap_or_else(|| {
        ElementNamer::new(options.postfix.clone())
            .generated_simple_name(relative_name(&package, &annotated_class))
    });
    RegistrationStub {
        package,
        class_name,
        annotated_class,
        timestamp: options.render_timestamp(),
        generated_import: options.java_version.generated_import().to_string(),
        registration_interface: options.registration_interface.clone(),
    }
}

pub fn run(
    package: String,
    annotated_class: String,
    class_name: Option<String>,
    java_version: Option<String>,
    timestamp: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ProcessorOptions::default().with_env();
    if let Some(version) = java_version {
        options.java_version = JavaVersion::parse(&version);
    }
    if timestamp.is_some() {
        options.timestamp = timestamp;
    }

    print!("{}", stub(package, annotated_class, class_name, &options).render()?);
    Ok(())
}
