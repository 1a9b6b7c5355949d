use super::{RawAnnotation, strip_whitespace, text};
use picoservice_api::{AnnotationValue, DEFAULT_ATTRIBUTE};
use std::collections::BTreeMap;
use tree_sitter::Node;

/// Annotations in the `modifiers` of a declaration.
pub(super) fn from_declaration(node: Node, bytes: &[u8]) -> Vec<RawAnnotation> {
    let mut cursor = node.walk();
    let modifiers = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "modifiers");
    let Some(modifiers) = modifiers else {
        return Vec::new();
    };

    let mut cursor = modifiers.walk();
    let children: Vec<Node> = modifiers.named_children(&mut cursor).collect();
    children
        .into_iter()
        .filter_map(|child| parse_annotation(child, bytes))
        .collect()
}

fn parse_annotation(node: Node, bytes: &[u8]) -> Option<RawAnnotation> {
    if !matches!(node.kind(), "marker_annotation" | "annotation") {
        return None;
    }
    let name = strip_whitespace(text(node.child_by_field_name("name")?, bytes));
    let mut values = BTreeMap::new();

    if let Some(arguments) = node.child_by_field_name("arguments") {
        let mut cursor = arguments.walk();
        let args: Vec<Node> = arguments.named_children(&mut cursor).collect();
        for arg in args {
            if arg.kind() == "element_value_pair" {
                let key = arg.child_by_field_name("key").map(|k| text(k, bytes));
                let value = arg.child_by_field_name("value");
                if let (Some(key), Some(value)) = (key, value) {
                    values.insert(key.to_string(), parse_value(value, bytes));
                }
            } else if arg.kind() != "comment" {
                values.insert(DEFAULT_ATTRIBUTE.to_string(), parse_value(arg, bytes));
            }
        }
    }

    Some(RawAnnotation { name, values })
}

fn parse_value(node: Node, bytes: &[u8]) -> AnnotationValue {
    match node.kind() {
        // RetentionPolicy.RUNTIME
        "field_access" => match node.child_by_field_name("field") {
            Some(field) => AnnotationValue::EnumConstant(text(field, bytes).to_string()),
            None => AnnotationValue::Other(text(node, bytes).to_string()),
        },
        // RUNTIME, statically imported
        "identifier" if is_constant_name(text(node, bytes)) => {
            AnnotationValue::EnumConstant(text(node, bytes).to_string())
        }
        "string_literal" => {
            let raw = text(node, bytes);
            let unquoted = raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(raw);
            AnnotationValue::Str(unquoted.to_string())
        }
        "element_value_array_initializer" => {
            let mut cursor = node.walk();
            let items: Vec<Node> = node.named_children(&mut cursor).collect();
            AnnotationValue::Array(
                items
                    .into_iter()
                    .filter(|n| n.kind() != "comment")
                    .map(|n| parse_value(n, bytes))
                    .collect(),
            )
        }
        _ => AnnotationValue::Other(text(node, bytes).to_string()),
    }
}

fn is_constant_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
