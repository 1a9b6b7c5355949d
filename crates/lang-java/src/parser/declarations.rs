use super::{Declaration, annotations, text};
use picoservice_api::ElementKind;
use tree_sitter::Node;

fn type_kind(kind: &str) -> Option<ElementKind> {
    match kind {
        "class_declaration" => Some(ElementKind::Class),
        "interface_declaration" => Some(ElementKind::Interface),
        "enum_declaration" => Some(ElementKind::Enum),
        "record_declaration" => Some(ElementKind::Record),
        "annotation_type_declaration" => Some(ElementKind::AnnotationType),
        _ => None,
    }
}

fn executable_kind(kind: &str) -> Option<ElementKind> {
    match kind {
        "method_declaration" => Some(ElementKind::Method),
        "constructor_declaration" | "compact_constructor_declaration" => {
            Some(ElementKind::Constructor)
        }
        _ => None,
    }
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).collect();
    children
}

/// Collects the declarations found at or below `node` into `out`.
pub(super) fn collect(node: Node, bytes: &[u8], out: &mut Vec<Declaration>) {
    if let Some(kind) = type_kind(node.kind()) {
        out.push(type_declaration(node, kind, bytes));
        return;
    }
    if let Some(kind) = executable_kind(node.kind()) {
        out.push(executable(node, kind, bytes));
        return;
    }
    match node.kind() {
        // Anonymous class bodies: types inside them have no usable enclosing name.
        "object_creation_expression" | "enum_constant" => {
            for child in named_children(node) {
                if child.kind() == "class_body" {
                    out.push(opaque(child, "", bytes));
                } else {
                    collect(child, bytes, out);
                }
            }
        }
        _ => {
            for child in named_children(node) {
                collect(child, bytes, out);
            }
        }
    }
}

fn type_declaration(node: Node, kind: ElementKind, bytes: &[u8]) -> Declaration {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, bytes).to_string())
        .unwrap_or_default();
    let members = node
        .child_by_field_name("body")
        .map(|body| class_members(body, bytes))
        .unwrap_or_default();

    Declaration {
        kind,
        name,
        offset: node.start_byte(),
        line: node.start_position().row + 1,
        annotations: annotations::from_declaration(node, bytes),
        members,
    }
}

fn class_members(body: Node, bytes: &[u8]) -> Vec<Declaration> {
    let mut out = Vec::new();
    for child in named_children(body) {
        match child.kind() {
            "enum_body_declarations" => out.extend(class_members(child, bytes)),
            "static_initializer" => out.push(opaque(child, "<clinit>", bytes)),
            "block" => out.push(opaque(child, "<init>", bytes)),
            _ => collect(child, bytes, &mut out),
        }
    }
    out
}

fn executable(node: Node, kind: ElementKind, bytes: &[u8]) -> Declaration {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, bytes).to_string())
        .unwrap_or_default();
    let mut members = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        collect(body, bytes, &mut members);
    }

    Declaration {
        kind,
        name,
        offset: node.start_byte(),
        line: node.start_position().row + 1,
        annotations: Vec::new(),
        members,
    }
}

/// Initializer blocks and anonymous bodies.
fn opaque(node: Node, name: &str, bytes: &[u8]) -> Declaration {
    let mut members = Vec::new();
    if node.kind() == "class_body" {
        members = class_members(node, bytes);
    } else {
        collect_children(node, bytes, &mut members);
    }

    Declaration {
        kind: ElementKind::Other,
        name: name.to_string(),
        offset: node.start_byte(),
        line: node.start_position().row + 1,
        annotations: Vec::new(),
        members,
    }
}

fn collect_children(node: Node, bytes: &[u8], out: &mut Vec<Declaration>) {
    for child in named_children(node) {
        collect(child, bytes, out);
    }
}
