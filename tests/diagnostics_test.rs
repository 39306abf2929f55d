mod common;

use common::*;
use gridfn::ast::Position;
use gridfn::{extract, CellValueKind, ValueType};
use pretty_assertions::assert_eq;

#[test]
fn test_case_variant_names_produce_one_duplicate_name_diagnostic() {
    let module = module(vec![
        function("total", Some(custom_function_doc("", &[])), vec![]),
        function("Total", Some(custom_function_doc("", &[])), vec![]),
    ]);

    let result = extract(&module);
    // Both the name and the id namespaces collide; each reports once.
    let name_duplicates: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.message.starts_with("Duplicate function name"))
        .collect();
    assert_eq!(name_duplicates.len(), 1);

    let id_duplicates: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.message.starts_with("Duplicate function id"))
        .collect();
    assert_eq!(id_duplicates.len(), 1);

    // Both declarations still produced records.
    assert_eq!(result.functions.len(), 2);
}

#[test]
fn test_unsupported_reference_type() {
    let module = module(vec![function(
        "aliased",
        Some(custom_function_doc("", &[])),
        vec![param(
            "value",
            Some(gridfn::ast::TypeNode::reference("MyAlias")),
        )],
    )]);

    let result = extract(&module);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].message, "Unsupported type: MyAlias");
    assert_eq!(result.functions[0].parameters[0].value_type, ValueType::Any);
}

#[test]
fn test_cell_value_parameter_support_and_rejection() {
    let module = module(vec![function(
        "cells",
        Some(custom_function_doc("", &[])),
        vec![
            param(
                "flag",
                Some(gridfn::ast::TypeNode::reference("BooleanCellValue")),
            ),
            param(
                "blob",
                Some(gridfn::ast::TypeNode::reference("ArrayCellValue")),
            ),
        ],
    )]);

    let result = extract(&module);
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0]
        .message
        .contains("Unsupported cell value type"));

    let params = &result.functions[0].parameters;
    assert_eq!(params[0].value_type, ValueType::Boolean);
    assert_eq!(
        params[0].cell_value_type,
        Some(CellValueKind::BooleanCellValue)
    );
    assert_eq!(params[1].value_type, ValueType::Any);
    assert_eq!(
        params[1].cell_value_type,
        Some(CellValueKind::ArrayCellValue)
    );
}

#[test]
fn test_cell_value_result_downgrades() {
    let module = module(vec![function_returning(
        "lookupImage",
        Some(custom_function_doc("", &[])),
        vec![],
        array(array(gridfn::ast::TypeNode::reference("DoubleCellValue"))),
    )]);

    let result = extract(&module);
    let inferred = result.functions[0].result.as_ref().unwrap();
    // Matrix survives; the cell-value basic type does not.
    assert_eq!(inferred.value_type, None);
    assert_eq!(
        inferred.dimensionality,
        Some(gridfn::Dimensionality::Matrix)
    );
}

#[test]
fn test_doc_type_mismatch_keeps_declared_type() {
    let module = module(vec![function(
        "conflicted",
        Some(doc(
            "",
            &[("customfunction", ""), ("param", "{string} value")],
        )),
        vec![param("value", Some(number()))],
    )]);

    let result = extract(&module);
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message.contains("value"));
    assert_eq!(
        result.functions[0].parameters[0].value_type,
        ValueType::Number
    );
}

#[test]
fn test_invalid_id_and_name_still_emit_record() {
    let module = module(vec![function(
        "bad",
        Some(doc("", &[("customfunction", "my-id 1display")])),
        vec![],
    )]);

    let result = extract(&module);
    let messages: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert!(messages
        .iter()
        .any(|m| m.contains("id contains invalid characters")));
    assert!(messages
        .iter()
        .any(|m| m.contains("name contains invalid characters")));
    assert_eq!(result.functions.len(), 1);
    assert_eq!(result.functions[0].id, "MY-ID");
}

#[test]
fn test_identifier_length_boundary() {
    let exactly = "A".repeat(128);
    let over = "A".repeat(129);

    let module = module(vec![
        function(&exactly, Some(custom_function_doc("", &[])), vec![]),
        function(&over, Some(custom_function_doc("", &[])), vec![]),
    ]);

    let result = extract(&module);
    let length_messages: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.message.contains("exceeds 128"))
        .collect();
    // The 129-char declaration trips both the id and the name rule.
    assert_eq!(length_messages.len(), 2);
}

#[test]
fn test_diagnostics_carry_positions() {
    let mut module = module(vec![]);
    module.items.push(gridfn::ast::Item::Function(
        gridfn::ast::FunctionDecl {
            name: "located".to_string(),
            doc: Some(custom_function_doc("", &[])),
            parameters: vec![param(
                "value",
                Some(gridfn::ast::TypeNode::reference("Mystery")),
            )],
            return_type: None,
            position: Some(Position::new(11, 0)),
        },
    ));

    let result = extract(&module);
    assert_eq!(result.diagnostics.len(), 1);
    // Parameter had no position of its own; none is attached.
    assert_eq!(result.diagnostics[0].position, None);

    // Rendered form is one-indexed when a position exists.
    let positioned = gridfn::Diagnostic::new("Unsupported type: Mystery", Some(Position::new(11, 4)));
    assert_eq!(positioned.to_string(), "Unsupported type: Mystery (12,5)");
}

#[test]
fn test_streaming_with_declared_return_type() {
    let module = module(vec![function_returning(
        "stream",
        Some(custom_function_doc("", &[])),
        vec![param(
            "handler",
            Some(generic("StreamingInvocation", vec![number()])),
        )],
        number(),
    )]);

    let result = extract(&module);
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0]
        .message
        .contains("streaming function"));
    // The handler's type argument still wins.
    let inferred = result.functions[0].result.as_ref().unwrap();
    assert_eq!(inferred.value_type, Some(ValueType::Number));
}

#[test]
fn test_returns_tag_mismatch_doc_wins() {
    let module = module(vec![function_returning(
        "disputed",
        Some(doc(
            "",
            &[("customfunction", ""), ("returns", "{string}")],
        )),
        vec![],
        number(),
    )]);

    let result = extract(&module);
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0]
        .message
        .contains("Return type in code comment"));
    let inferred = result.functions[0].result.as_ref().unwrap();
    assert_eq!(inferred.value_type, Some(ValueType::String));
}
