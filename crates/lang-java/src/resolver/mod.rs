//! Annotation name resolution.
//!
//! Annotation names in source are resolved the way the compiler would for
//! the cases that matter here: single-type imports, then the current package,
//! then on-demand imports and the implicit `java.lang.*`. Names that cannot be
//! resolved fall back to the current package.

use crate::parser::Import;
use picoservice_api::qualify;
use std::collections::HashSet;
use tracing::warn;

/// Types of `java.lang.annotation` that may be referenced through `import java.lang.annotation.*`.
pub const JAVA_LANG_ANNOTATION_TYPES: &[&str] = &[
    "Documented",
    "Inherited",
    "Native",
    "Repeatable",
    "Retention",
    "Target",
];
const JAVA_LANG_ANNOTATION: &str = "java.lang.annotation";

/// Annotation types of `java.lang`, visible without an import.
pub const JAVA_LANG_TYPES: &[&str] = &[
    "Deprecated",
    "FunctionalInterface",
    "Override",
    "SafeVarargs",
    "SuppressWarnings",
];
const JAVA_LANG: &str = "java.lang";

pub struct ImportScope<'a> {
    pub package: &'a str,
    pub imports: &'a [Import],
    /// Fully qualified names of every type declared in the parsed sources.
    pub declared: &'a HashSet<String>,
    /// Fully qualified names of types known to exist outside the sources,
    /// such as the service marker.
    pub external: Option<&'a HashSet<String>>,
}

impl<'a> ImportScope<'a> {
    pub fn new(package: &'a str, imports: &'a [Import], declared: &'a HashSet<String>) -> Self {
        Self {
            package,
            imports,
            declared,
            external: None,
        }
    }

    pub fn with_external(mut self, external: &'a HashSet<String>) -> Self {
        self.external = Some(external);
        self
    }

    fn is_known(&self, package: &str, name: &str, fqn: &str) -> bool {
        self.declared.contains(fqn)
            || self.external.is_some_and(|e| e.contains(fqn))
            || (package == JAVA_LANG_ANNOTATION && JAVA_LANG_ANNOTATION_TYPES.contains(&name))
    }

    pub fn resolve(&self, name: &str) -> String {
        match name.split_once('.') {
            // Outer.Inner resolves through Outer; otherwise the name is already qualified
            Some((first, rest)) => match self.resolve_simple(first) {
                Some(outer) => format!("{}.{}", outer, rest),
                None => name.to_string(),
            },
            None => self.resolve_simple(name).unwrap_or_else(|| {
                let fallback = qualify(self.package, name);
                warn!(
                    "Cannot resolve annotation @{}, assuming {} (not declared in the sources)",
                    name, fallback
                );
                fallback
            }),
        }
    }

    fn resolve_simple(&self, name: &str) -> Option<String> {
        // 1. Single-type imports
        let suffix = format!(".{}", name);
        if let Some(import) = self
            .imports
            .iter()
            .find(|imp| !imp.is_static && !imp.on_demand && imp.name.ends_with(&suffix))
        {
            return Some(import.name.clone());
        }

        // 2. Current package
        let candidate = qualify(self.package, name);
        if self.is_known(self.package, name, &candidate) {
            return Some(candidate);
        }

        // 3. On-demand imports
        let on_demand = self
            .imports
            .iter()
            .filter(|imp| imp.on_demand && !imp.is_static)
            .find_map(|imp| {
                let candidate = format!("{}.{}", imp.name, name);
                self.is_known(&imp.name, name, &candidate)
                    .then_some(candidate)
            });
        if on_demand.is_some() {
            return on_demand;
        }

        // 4. java.lang
        let candidate = format!("{}.{}", JAVA_LANG, name);
        (JAVA_LANG_TYPES.contains(&name) || self.is_known(JAVA_LANG, name, &candidate))
            .then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(name: &str, on_demand: bool) -> Import {
        Import {
            name: name.to_string(),
            is_static: false,
            on_demand,
        }
    }

    #[test]
    fn test_single_type_import_wins() {
        let declared: HashSet<String> = ["com.acme.Service".to_string()].into_iter().collect();
        let imports = vec![import("org.other.Service", false)];
        let scope = ImportScope::new("com.acme", &imports, &declared);
        assert_eq!(scope.resolve("Service"), "org.other.Service");
    }

    #[test]
    fn test_same_package_then_on_demand() {
        let declared: HashSet<String> = ["com.acme.Service".to_string(), "lib.api.Plugin".to_string()]
            .into_iter()
            .collect();
        let imports = vec![import("lib.api", true), import("java.lang.annotation", true)];
        let scope = ImportScope::new("com.acme", &imports, &declared);

        assert_eq!(scope.resolve("Service"), "com.acme.Service");
        assert_eq!(scope.resolve("Plugin"), "lib.api.Plugin");
        assert_eq!(scope.resolve("Retention"), "java.lang.annotation.Retention");
        assert_eq!(scope.resolve("Unknown"), "com.acme.Unknown");
    }

    #[test]
    fn test_on_demand_import_of_external_type() {
        let declared = HashSet::new();
        let external: HashSet<String> = ["de.adito.picoservice.PicoService".to_string()]
            .into_iter()
            .collect();
        let imports = vec![import("de.adito.picoservice", true)];
        let scope = ImportScope::new("com.acme", &imports, &declared).with_external(&external);
        assert_eq!(scope.resolve("PicoService"), "de.adito.picoservice.PicoService");

        let without = ImportScope::new("com.acme", &imports, &declared);
        assert_eq!(without.resolve("PicoService"), "com.acme.PicoService");
    }

    #[test]
    fn test_java_lang_is_implicit() {
        let declared: HashSet<String> = ["com.acme.Override".to_string()].into_iter().collect();
        let imports = vec![];
        let scope = ImportScope::new("com.acme", &imports, &declared);
        assert_eq!(scope.resolve("Deprecated"), "java.lang.Deprecated");
        // a same-package declaration shadows java.lang
        assert_eq!(scope.resolve("Override"), "com.acme.Override");
    }

    #[test]
    fn test_dotted_names() {
        let declared: HashSet<String> = ["com.acme.Outer".to_string()].into_iter().collect();
        let imports = vec![];
        let scope = ImportScope::new("com.acme", &imports, &declared);

        assert_eq!(scope.resolve("Outer.Marker"), "com.acme.Outer.Marker");
        assert_eq!(
            scope.resolve("de.adito.picoservice.PicoService"),
            "de.adito.picoservice.PicoService"
        );
    }

    #[test]
    fn test_unnamed_package_fallback() {
        let declared = HashSet::new();
        let imports = vec![];
        let scope = ImportScope::new("", &imports, &declared);
        assert_eq!(scope.resolve("Service"), "Service");
    }
}
