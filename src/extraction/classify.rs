//! Trailing-parameter classification and result inference.
//!
//! Only the last declared parameter can carry a host-provided role
//! (streaming result handler, cancellation signal, invocation context).
//! A matched trailing parameter is excluded from the emitted parameter
//! list, and for streaming functions it also determines the result
//! shape.

use super::resolve::{self, EnumContext};
use super::tags::DocInfo;
use crate::ast::{FunctionDecl, TypeNode};
use crate::core::types::{Diagnostic, Dimensionality, ResultMetadata, ValueType};

/// Role a designated trailing parameter can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingRole {
    Streaming,
    Cancelable,
    Invocation,
}

impl TrailingRole {
    /// Single name → role table, bare and namespace-qualified forms.
    /// Names are matched as written; aliases don't resolve here.
    pub fn from_reference_name(name: &str) -> Option<Self> {
        let bare = name.strip_prefix("CustomFunctions.").unwrap_or(name);
        match bare {
            "StreamingInvocation" | "StreamingHandler" | "IStreamingCustomFunctionHandler" => {
                Some(Self::Streaming)
            }
            "CancelableInvocation" | "CancelableHandler" | "ICancelableInvocation" => {
                Some(Self::Cancelable)
            }
            "Invocation" => Some(Self::Invocation),
            _ => None,
        }
    }

    pub fn is_streaming(self) -> bool {
        matches!(self, Self::Streaming)
    }
}

/// Role of the function's last declared parameter, if it has one.
///
/// The structural type-reference name decides; the doc annotation is
/// consulted only when the parameter declares no structural type.
pub fn classify_trailing(function: &FunctionDecl, doc: &DocInfo) -> Option<TrailingRole> {
    let last = function.parameters.last()?;
    if let Some(node) = &last.type_node {
        return node.reference_name().and_then(TrailingRole::from_reference_name);
    }
    let doc_type = doc.params.get(&last.name)?.doc_type.as_ref()?;
    TrailingRole::from_reference_name(&doc_type.name)
}

/// Infer the function result.
///
/// Priority: streaming handler type argument, then the structural
/// return (one level of `Promise` unwrapped), then the `@returns` doc
/// tag, then the omitted default. A cell-value-derived result type is
/// downgraded to `any`; cell-value typing only means something on
/// parameters.
pub fn infer_result(
    function: &FunctionDecl,
    doc: &DocInfo,
    role: Option<TrailingRole>,
    context: &EnumContext,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ResultMetadata> {
    if role.is_some_and(TrailingRole::is_streaming) {
        return infer_streaming_result(function, doc, context, diagnostics);
    }

    let structural = function.return_type.as_ref().map(unwrap_promise);
    let mut resolved = resolve::resolve_type(structural, context, function.position, diagnostics);
    let mut dimensionality = resolved.dimensionality;

    if let Some(doc_type) = &doc.returns {
        if let Some(declared) = structural {
            if resolve::kinds_disagree(declared, &doc_type.node) {
                diagnostics.push(Diagnostic::new(
                    "Return type in code comment does not match the declared return type",
                    function.position,
                ));
            }
        }
        resolved =
            resolve::resolve_type(Some(&doc_type.node), context, function.position, diagnostics);
        dimensionality = resolved.dimensionality;
    }

    let value_type = if resolved.cell_value.is_some() {
        ValueType::Any
    } else {
        resolved.value_type
    };

    build_result(value_type, dimensionality)
}

fn infer_streaming_result(
    function: &FunctionDecl,
    doc: &DocInfo,
    context: &EnumContext,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ResultMetadata> {
    if let Some(return_type) = &function.return_type {
        if !is_void_like(return_type) {
            diagnostics.push(Diagnostic::new(
                "A streaming function must not declare a return type; the result comes through the handler parameter",
                function.position,
            ));
        }
    }

    let last = function.parameters.last()?;

    if let Some(TypeNode::Reference { type_args, .. }) = &last.type_node {
        if type_args.len() != 1 {
            diagnostics.push(Diagnostic::new(
                "A streaming handler must take exactly one type argument",
                last.position,
            ));
            return None;
        }
        let argument = &type_args[0];
        let (_, depth) = resolve::strip_arrays(argument);
        let resolved = resolve::resolve_type(Some(argument), context, last.position, diagnostics);
        let value_type = if resolved.cell_value.is_some() {
            ValueType::Any
        } else {
            resolved.value_type
        };
        // The handler produces one nesting level beyond scalar: a
        // single array argument already streams a matrix.
        let dimensionality = if depth >= 1 {
            Dimensionality::Matrix
        } else {
            Dimensionality::Scalar
        };
        return build_result(value_type, dimensionality);
    }

    // No structural handler type: fall back to the doc annotation's
    // recorded inner type and dimensionality.
    let doc_type = doc.params.get(&last.name)?.doc_type.as_ref()?;
    let inner = doc_type.inner_name.as_deref()?;
    let inner_node = super::tags::parse_doc_type(inner)?.node;
    let resolved = resolve::resolve_type(Some(&inner_node), context, last.position, diagnostics);
    let value_type = if resolved.cell_value.is_some() {
        ValueType::Any
    } else {
        resolved.value_type
    };
    build_result(value_type, doc_type.inner_dimensionality)
}

/// Unwrap a single-argument `Promise` one level.
fn unwrap_promise(node: &TypeNode) -> &TypeNode {
    match node {
        TypeNode::Reference { name, type_args } if name == "Promise" && type_args.len() == 1 => {
            &type_args[0]
        }
        _ => node,
    }
}

fn is_void_like(node: &TypeNode) -> bool {
    node.is_void() || unwrap_promise(node).is_void()
}

fn build_result(value_type: ValueType, dimensionality: Dimensionality) -> Option<ResultMetadata> {
    let result = ResultMetadata {
        value_type: (value_type != ValueType::Any).then_some(value_type),
        dimensionality: (dimensionality == Dimensionality::Matrix)
            .then_some(Dimensionality::Matrix),
    };
    (!result.is_default()).then_some(result)
}
