use crate::error::{JavaHostError, Result};
use picoservice_api::{AnnotationValue, ElementKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use tree_sitter::{Node, Parser};

mod annotations;
mod declarations;

/// One `import` line of a compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Imported name without `static` and without the trailing `.*`.
    pub name: String,
    pub is_static: bool,
    pub on_demand: bool,
}

/// An annotation as written in source, before its name is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAnnotation {
    pub name: String,
    pub values: BTreeMap<String, AnnotationValue>,
}

/// A declaration that can enclose or carry annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: ElementKind,
    pub name: String,
    /// Byte offset of the declaration; part of the element identity.
    pub offset: usize,
    /// One-based line of the declaration.
    pub line: usize,
    pub annotations: Vec<RawAnnotation>,
    pub members: Vec<Declaration>,
}

impl Declaration {
    pub fn is_type(&self) -> bool {
        self.kind.is_type()
    }
}

/// Syntactic content of one `.java` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub path: PathBuf,
    /// Declared package; empty for the unnamed package.
    pub package: String,
    pub imports: Vec<Import>,
    pub types: Vec<Declaration>,
}

impl CompilationUnit {
    /// Fully qualified names of all member types declared in this unit.
    ///
    /// Local types are not reachable by name from other units and are skipped.
    pub fn declared_type_names(&self) -> Vec<String> {
        fn visit(decl: &Declaration, prefix: &str, out: &mut Vec<String>) {
            if !decl.is_type() {
                return;
            }
            let name = picoservice_api::qualify(prefix, &decl.name);
            for member in &decl.members {
                visit(member, &name, out);
            }
            out.push(name);
        }

        let mut out = Vec::new();
        for decl in &self.types {
            visit(decl, &self.package, &mut out);
        }
        out
    }
}

pub struct JavaSourceParser {
    parser: Parser,
}

impl JavaSourceParser {
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<CompilationUnit> {
        let source = std::fs::read_to_string(path).map_err(|e| JavaHostError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_source(&source, path)
    }

    pub fn parse_source(&mut self, source: &str, path: &Path) -> Result<CompilationUnit> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| JavaHostError::Parse(path.to_path_buf()))?;
        let root = tree.root_node();
        if root.has_error() {
            warn!("{} contains syntax errors, continuing with what parsed", path.display());
        }

        let bytes = source.as_bytes();
        let mut unit = CompilationUnit {
            path: path.to_path_buf(),
            package: String::new(),
            imports: Vec::new(),
            types: Vec::new(),
        };

        let mut cursor = root.walk();
        let children: Vec<Node> = root.named_children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "package_declaration" => {
                    unit.package = package_name(child, bytes).unwrap_or_default();
                }
                "import_declaration" => {
                    if let Some(import) = parse_import(child, bytes) {
                        unit.imports.push(import);
                    }
                }
                _ => declarations::collect(child, bytes, &mut unit.types),
            }
        }
        Ok(unit)
    }
}

fn text<'a>(node: Node, bytes: &'a [u8]) -> &'a str {
    node.utf8_text(bytes).unwrap_or_default()
}

fn package_name(node: Node, bytes: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let name = node
        .named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
        .map(|c| strip_whitespace(text(c, bytes)));
    name
}

fn parse_import(node: Node, bytes: &[u8]) -> Option<Import> {
    let raw = text(node, bytes).trim();
    let body = raw.strip_prefix("import")?.trim().trim_end_matches(';');
    let body = strip_whitespace(body);
    let (is_static, body) = match body.strip_prefix("static") {
        // `static` is glued to the name once whitespace is gone
        Some(rest) if is_static_import(node) => (true, rest.to_string()),
        _ => (false, body),
    };
    let (on_demand, name) = match body.strip_suffix(".*") {
        Some(prefix) => (true, prefix.to_string()),
        None => (false, body),
    };
    if name.is_empty() {
        return None;
    }
    Some(Import {
        name,
        is_static,
        on_demand,
    })
}

fn is_static_import(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == "static");
    found
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
