//! Type and dimensionality resolution.
//!
//! Turns a structural type annotation (or its doc-comment fallback) into
//! the semantic type, dimensionality, and repeating flag of a parameter,
//! binding enum references against the enums collected earlier in the
//! pass. Named references are resolved strictly — an unrecognized name
//! is a diagnostic — while structural shapes (unions, tuples, unknown
//! keywords) fall back to `any` silently. That asymmetry is the scope
//! boundary of the extractor, not an oversight: alias and generic
//! resolution happen upstream or not at all.

use super::tags::ParamDoc;
use crate::ast::{KeywordType, ParamDecl, Position, TypeNode};
use crate::core::types::{
    CellValueKind, Diagnostic, Dimensionality, EnumKind, ParameterMetadata, ValueType,
};
use std::collections::{HashMap, HashSet};

/// Enum bindings collected before any function resolution.
#[derive(Debug, Default)]
pub struct EnumContext {
    /// Names of enums without the custom tag; references to them
    /// silently resolve to `any`.
    pub basic_names: HashSet<String>,
    /// Custom enums keyed by declared name.
    pub custom: HashMap<String, CustomEnumBinding>,
}

#[derive(Debug, Clone)]
pub struct CustomEnumBinding {
    pub id: String,
    pub kind: EnumKind,
}

/// Outcome of resolving one type annotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedType {
    pub value_type: ValueType,
    pub dimensionality: Dimensionality,
    pub repeating: bool,
    pub cell_value: Option<CellValueKind>,
    pub custom_enum: Option<String>,
}

/// Unwrap `T[]` and `Array<T>` nesting, counting depth.
pub fn strip_arrays(node: &TypeNode) -> (&TypeNode, usize) {
    let mut current = node;
    let mut depth = 0;
    loop {
        match current {
            TypeNode::Array(elem) => {
                current = elem;
                depth += 1;
            }
            TypeNode::Reference { name, type_args } if name == "Array" && type_args.len() == 1 => {
                current = &type_args[0];
                depth += 1;
            }
            _ => return (current, depth),
        }
    }
}

/// Resolve a type annotation. Absence of any annotation is `any`,
/// scalar, no diagnostic.
pub fn resolve_type(
    node: Option<&TypeNode>,
    context: &EnumContext,
    position: Option<Position>,
    diagnostics: &mut Vec<Diagnostic>,
) -> ResolvedType {
    let Some(node) = node else {
        return ResolvedType::default();
    };

    let (base, depth) = strip_arrays(node);
    let mut resolved = ResolvedType {
        dimensionality: if depth > 1 {
            Dimensionality::Matrix
        } else {
            Dimensionality::Scalar
        },
        // Depth-2 arrays are a matrix of scalars, not a repeating
        // matrix; only depths 1 and 3 follow the repeating convention.
        repeating: depth == 1 || depth == 3,
        ..Default::default()
    };

    match base {
        TypeNode::Keyword(keyword) => {
            resolved.value_type = match keyword {
                KeywordType::Number => ValueType::Number,
                KeywordType::String => ValueType::String,
                KeywordType::Boolean => ValueType::Boolean,
                _ => ValueType::Any,
            };
        }
        TypeNode::Reference { name, .. } => {
            resolve_reference(name, context, position, diagnostics, &mut resolved);
        }
        TypeNode::Union(_) | TypeNode::Tuple(_) => {
            resolved.value_type = ValueType::Any;
        }
        // strip_arrays never leaves an array at the base
        TypeNode::Array(_) => unreachable!(),
    }

    resolved
}

fn resolve_reference(
    name: &str,
    context: &EnumContext,
    position: Option<Position>,
    diagnostics: &mut Vec<Diagnostic>,
    resolved: &mut ResolvedType,
) {
    if context.basic_names.contains(name) {
        resolved.value_type = ValueType::Any;
        return;
    }

    if let Some(binding) = context.custom.get(name) {
        resolved.value_type = binding.kind.value_type();
        resolved.custom_enum = Some(binding.id.clone());
        return;
    }

    if let Some(cell_value) = CellValueKind::from_reference_name(name) {
        if !cell_value.is_supported() {
            diagnostics.push(Diagnostic::new(
                format!("Unsupported cell value type: {name}"),
                position,
            ));
        }
        resolved.value_type = cell_value.basic_type();
        resolved.cell_value = Some(cell_value);
        return;
    }

    log::trace!("unrecognized reference type {name}");
    diagnostics.push(Diagnostic::new(
        format!("Unsupported type: {name}"),
        position,
    ));
    resolved.value_type = ValueType::Any;
}

/// Shallow kind comparison between a declared type and its doc-comment
/// annotation. Array element types are not compared; only the node
/// kind, reference name, or keyword has to line up.
pub fn kinds_disagree(declared: &TypeNode, annotated: &TypeNode) -> bool {
    if declared.is_array() || annotated.is_array() {
        return declared.is_array() != annotated.is_array();
    }
    match (declared, annotated) {
        (TypeNode::Keyword(a), TypeNode::Keyword(b)) => a != b,
        (TypeNode::Reference { name: a, .. }, TypeNode::Reference { name: b, .. }) => a != b,
        (TypeNode::Union(_), TypeNode::Union(_)) => false,
        (TypeNode::Tuple(_), TypeNode::Tuple(_)) => false,
        _ => true,
    }
}

/// Resolve one declared parameter against its doc entry.
pub fn resolve_parameter(
    param: &ParamDecl,
    doc: Option<&ParamDoc>,
    context: &EnumContext,
    diagnostics: &mut Vec<Diagnostic>,
) -> ParameterMetadata {
    let structural = param.type_node.as_ref();
    let annotated = doc.and_then(|entry| entry.doc_type.as_ref()).map(|t| &t.node);

    let chosen = match (structural, annotated) {
        (Some(declared), Some(doc_node)) => {
            if kinds_disagree(declared, doc_node) {
                diagnostics.push(Diagnostic::new(
                    format!(
                        "Type of parameter '{}' in code comment does not match its declared type",
                        param.name
                    ),
                    param.position,
                ));
            }
            Some(declared)
        }
        (declared, doc_node) => declared.or(doc_node),
    };

    let resolved = resolve_type(chosen, context, param.position, diagnostics);

    ParameterMetadata {
        name: param.name.clone(),
        description: doc.and_then(|entry| entry.description.clone()),
        value_type: resolved.value_type,
        dimensionality: (resolved.dimensionality == Dimensionality::Matrix)
            .then_some(Dimensionality::Matrix),
        optional: param.optional || param.has_default || doc.is_some_and(|entry| entry.optional),
        repeating: resolved.repeating,
        cell_value_type: resolved.cell_value,
        custom_enum_type: resolved.custom_enum,
    }
}
