//! Metadata extraction pipeline.
//!
//! One call per parsed source file: collect enum declarations, then
//! resolve every custom-tagged function against them, threading the
//! duplicate-tracking accumulator across the whole file. Each
//! declaration resolves through pure helpers that return records and
//! diagnostics; nothing here mutates the input tree, and a malformed
//! declaration still produces a best-effort record next to its
//! diagnostics.

pub mod classify;
pub mod resolve;
pub mod tags;
pub mod validate;

use crate::ast::{EnumDecl, FunctionDecl, Item, MemberValue, SourceModule};
use crate::core::types::{
    Association, Diagnostic, EnumKind, EnumMetadata, EnumValue, EnumValueMetadata,
    ExtractionResult, FunctionMetadata, FunctionOptions,
};
use classify::TrailingRole;
use resolve::{CustomEnumBinding, EnumContext};
use tags::TagKind;
use validate::SeenIdentifiers;

/// Extract the metadata document for one parsed source file.
///
/// Never fails: all findings land on the result's diagnostics list.
pub fn extract(module: &SourceModule) -> ExtractionResult {
    log::debug!(
        "extracting custom function metadata from {}",
        module.path.display()
    );

    let mut seen = SeenIdentifiers::default();
    let mut result = ExtractionResult::default();
    let mut context = EnumContext::default();

    // Untagged enums are still recognized by name so references to
    // them can silently widen to `any`.
    for decl in enum_declarations(module) {
        if !tags::has_tag(decl.doc.as_ref(), TagKind::CustomEnum) {
            context.basic_names.insert(decl.name.clone());
        }
    }

    // Custom enums must all be bound before any function type
    // resolution consults them.
    for decl in enum_declarations(module) {
        if !tags::has_tag(decl.doc.as_ref(), TagKind::CustomEnum) {
            continue;
        }
        let metadata = resolve_enum(decl, &mut seen, &mut result.diagnostics);
        context.custom.insert(
            decl.name.clone(),
            CustomEnumBinding {
                id: metadata.id.clone(),
                kind: metadata.value_kind,
            },
        );
        result.enums.push(metadata);
    }

    for decl in function_declarations(module) {
        if !tags::has_tag(decl.doc.as_ref(), TagKind::CustomFunction) {
            continue;
        }
        let record = resolve_function(decl, &context, &mut seen, &mut result.diagnostics);
        result.associations.push(Association {
            source_file: module.path.clone(),
            declared_name: decl.name.clone(),
            id: record.id.clone(),
        });
        result.functions.push(record);
    }

    log::debug!(
        "extracted {} functions, {} enums, {} diagnostics",
        result.functions.len(),
        result.enums.len(),
        result.diagnostics.len()
    );
    result
}

/// Enum declarations among the direct children of the file root.
fn enum_declarations(module: &SourceModule) -> impl Iterator<Item = &EnumDecl> {
    module.items.iter().filter_map(|item| match item {
        Item::Enum(decl) => Some(decl),
        _ => None,
    })
}

/// Function declarations among the direct children of the file root.
fn function_declarations(module: &SourceModule) -> impl Iterator<Item = &FunctionDecl> {
    module.items.iter().filter_map(|item| match item {
        Item::Function(decl) => Some(decl),
        _ => None,
    })
}

fn resolve_enum(
    decl: &EnumDecl,
    seen: &mut SeenIdentifiers,
    diagnostics: &mut Vec<Diagnostic>,
) -> EnumMetadata {
    let doc_info = tags::interpret(decl.doc.as_ref(), TagKind::CustomEnum);
    let id = doc_info.id_override.unwrap_or_else(|| decl.name.clone());

    validate::check_id(&id, "Enum", decl.position, diagnostics);
    seen.check_enum_id(&id, decl.position, diagnostics);

    // The first member fixes the value kind for the whole enum.
    let value_kind = match decl.members.first().and_then(|m| m.value.as_ref()) {
        Some(MemberValue::Text(_)) => EnumKind::String,
        _ => EnumKind::Number,
    };

    let mut next_default = 0.0;
    let mut values = Vec::with_capacity(decl.members.len());
    for member in &decl.members {
        let value = match (&member.value, value_kind) {
            (Some(MemberValue::Number(n)), EnumKind::Number) => EnumValue::Number(*n),
            (Some(MemberValue::Text(s)), EnumKind::String) => EnumValue::Text(s.clone()),
            // Unvalued members count their own sequence, regardless of
            // what explicitly-valued siblings hold.
            (None, EnumKind::Number) => {
                let value = EnumValue::Number(next_default);
                next_default += 1.0;
                value
            }
            _ => {
                diagnostics.push(Diagnostic::new(
                    format!(
                        "Enum member value does not match the enum type: {}",
                        member.name
                    ),
                    member.position.or(decl.position),
                ));
                continue;
            }
        };
        values.push(EnumValueMetadata {
            name: member.name.clone(),
            value,
            tooltip: member
                .doc
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(String::from),
        });
    }

    EnumMetadata {
        id,
        value_kind,
        values,
    }
}

fn resolve_function(
    decl: &FunctionDecl,
    context: &EnumContext,
    seen: &mut SeenIdentifiers,
    diagnostics: &mut Vec<Diagnostic>,
) -> FunctionMetadata {
    let doc_info = tags::interpret(decl.doc.as_ref(), TagKind::CustomFunction);

    let id = doc_info
        .id_override
        .clone()
        .unwrap_or_else(|| decl.name.clone())
        .to_uppercase();
    let name = doc_info.name_override.clone().unwrap_or_else(|| id.clone());

    validate::check_id(&id, "Function", decl.position, diagnostics);
    validate::check_name(&name, decl.position, diagnostics);
    seen.check_function_name(&name, decl.position, diagnostics);
    seen.check_function_id(&id, decl.position, diagnostics);

    let role = classify::classify_trailing(decl, &doc_info);

    let declared = match role {
        Some(_) => &decl.parameters[..decl.parameters.len() - 1],
        None => &decl.parameters[..],
    };
    let parameters = declared
        .iter()
        .map(|param| {
            resolve::resolve_parameter(param, doc_info.params.get(&param.name), context, diagnostics)
        })
        .collect();

    let result = classify::infer_result(decl, &doc_info, role, context, diagnostics);

    validate::check_option_combinations(&doc_info, role, decl.position, diagnostics);

    let streaming = doc_info.stream_tag || role == Some(TrailingRole::Streaming);
    let mut options = FunctionOptions {
        cancelable: doc_info.cancelable_tag || role == Some(TrailingRole::Cancelable),
        stream: streaming,
        volatile: doc_info.volatile_tag,
        exclude_from_auto_complete: doc_info.exclude_from_auto_complete_tag,
        linked_entity_load_service: doc_info.linked_entity_load_service_tag,
        captures_calling_object: doc_info.captures_calling_object_tag,
        ..Default::default()
    };
    // Address requirements ride the streaming channel when the
    // function streams.
    if streaming {
        options.requires_stream_address = doc_info.requires_address_tag;
        options.requires_stream_parameter_addresses = doc_info.requires_parameter_addresses_tag;
    } else {
        options.requires_address = doc_info.requires_address_tag;
        options.requires_parameter_addresses = doc_info.requires_parameter_addresses_tag;
    }

    FunctionMetadata {
        id,
        name,
        description: doc_info.description,
        help_url: doc_info.help_url,
        parameters,
        result,
        options: (!options.is_default()).then_some(options),
    }
}
