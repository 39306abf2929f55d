mod common;

use common::*;
use gridfn::ast::MemberValue;
use gridfn::{extract, EnumKind, EnumValue, ValueType};
use pretty_assertions::assert_eq;

#[test]
fn test_number_enum_with_tooltips() {
    let module = module(vec![enum_decl(
        "Season",
        Some(doc("", &[("customenum", "")])),
        vec![
            member_with_tooltip("Spring", Some(MemberValue::Number(1.0)), "March to May"),
            member_with_tooltip("Summer", Some(MemberValue::Number(2.0)), "June to August"),
            member("Fall", Some(MemberValue::Number(3.0))),
        ],
    )]);

    let result = extract(&module);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.enums.len(), 1);

    let season = &result.enums[0];
    assert_eq!(season.id, "Season");
    assert_eq!(season.value_kind, EnumKind::Number);
    assert_eq!(season.values.len(), 3);
    assert_eq!(season.values[0].tooltip.as_deref(), Some("March to May"));
    assert_eq!(season.values[2].tooltip, None);
}

#[test]
fn test_string_enum() {
    let module = module(vec![enum_decl(
        "Currency",
        Some(doc("", &[("customenum", "")])),
        vec![
            member("Usd", Some(MemberValue::Text("USD".to_string()))),
            member("Eur", Some(MemberValue::Text("EUR".to_string()))),
        ],
    )]);

    let result = extract(&module);
    let currency = &result.enums[0];
    assert_eq!(currency.value_kind, EnumKind::String);
    assert_eq!(
        currency.values[1].value,
        EnumValue::Text("EUR".to_string())
    );
}

#[test]
fn test_unvalued_members_count_from_zero() {
    let module = module(vec![enum_decl(
        "Index",
        Some(doc("", &[("customenum", "")])),
        vec![
            member("A", None),
            member("B", None),
            member("C", None),
            member("D", None),
        ],
    )]);

    let result = extract(&module);
    let values = &result.enums[0].values;
    for (position, value) in values.iter().enumerate() {
        assert_eq!(value.value, EnumValue::Number(position as f64));
    }
}

#[test]
fn test_custom_enum_parameter_binding() {
    let module = module(vec![
        enum_decl(
            "Fruit",
            Some(doc("", &[("customenum", "")])),
            vec![
                member("Apple", Some(MemberValue::Text("apple".to_string()))),
                member("Pear", Some(MemberValue::Text("pear".to_string()))),
            ],
        ),
        function(
            "price",
            Some(custom_function_doc("", &[])),
            vec![param("fruit", Some(gridfn::ast::TypeNode::reference("Fruit")))],
        ),
    ]);

    let result = extract(&module);
    assert!(result.diagnostics.is_empty());
    let parameter = &result.functions[0].parameters[0];
    assert_eq!(parameter.value_type, ValueType::String);
    assert_eq!(parameter.custom_enum_type.as_deref(), Some("Fruit"));
}

#[test]
fn test_basic_enum_reference_is_silently_any() {
    let module = module(vec![
        enum_decl("Weekday", None, vec![member("Monday", None)]),
        function(
            "schedule",
            Some(custom_function_doc("", &[])),
            vec![param("day", Some(gridfn::ast::TypeNode::reference("Weekday")))],
        ),
    ]);

    let result = extract(&module);
    assert!(result.diagnostics.is_empty());
    let parameter = &result.functions[0].parameters[0];
    assert_eq!(parameter.value_type, ValueType::Any);
    assert_eq!(parameter.custom_enum_type, None);
    // Untagged enums never reach the output document.
    assert!(result.enums.is_empty());
}

#[test]
fn test_enum_appears_before_referencing_function_regardless_of_order() {
    // The function is declared before the enum in source order; enum
    // collection still runs first.
    let module = module(vec![
        function(
            "pick",
            Some(custom_function_doc("", &[])),
            vec![param("level", Some(gridfn::ast::TypeNode::reference("Level")))],
        ),
        enum_decl(
            "Level",
            Some(doc("", &[("customenum", "")])),
            vec![member("Low", None), member("High", None)],
        ),
    ]);

    let result = extract(&module);
    assert!(result.diagnostics.is_empty());
    let parameter = &result.functions[0].parameters[0];
    assert_eq!(parameter.value_type, ValueType::Number);
    assert_eq!(parameter.custom_enum_type.as_deref(), Some("Level"));
}

#[test]
fn test_duplicate_enum_ids_case_insensitive() {
    let module = module(vec![
        enum_decl(
            "Color",
            Some(doc("", &[("customenum", "")])),
            vec![member("Red", None)],
        ),
        enum_decl(
            "COLOR",
            Some(doc("", &[("customenum", "")])),
            vec![member("Blue", None)],
        ),
    ]);

    let result = extract(&module);
    assert_eq!(result.enums.len(), 2);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].message, "Duplicate enum id: COLOR");
}

#[test]
fn test_enum_wire_shape() {
    let module = module(vec![enum_decl(
        "Season",
        Some(doc("", &[("customenum", "")])),
        vec![member_with_tooltip(
            "Spring",
            Some(MemberValue::Number(1.0)),
            "March to May",
        )],
    )]);

    let result = extract(&module);
    let rendered = gridfn::to_json_string(&result).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    let season = &value["enums"][0];
    assert_eq!(season["id"], "Season");
    assert_eq!(season["type"], "number");
    assert_eq!(season["values"][0]["name"], "Spring");
    assert_eq!(season["values"][0]["value"], 1);
    assert_eq!(season["values"][0]["tooltip"], "March to May");
}
