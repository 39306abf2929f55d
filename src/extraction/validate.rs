//! Identifier validation and cross-declaration checks.
//!
//! Ids are plain ASCII identifier material; display names allow any
//! Unicode letter start. Duplicate detection is case-insensitive and
//! file-scoped, over three independent namespaces (function names,
//! function ids, enum ids). Nothing here aborts processing; every
//! violation is a diagnostic on a best-effort record.

use super::classify::TrailingRole;
use super::tags::DocInfo;
use crate::ast::Position;
use crate::core::types::Diagnostic;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

pub const MAX_IDENTIFIER_LENGTH: usize = 128;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9._]*$").unwrap());
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{L}[\p{L}\p{N}._]*$").unwrap());

/// Running duplicate sets for one extraction pass. Keys are
/// upper-cased before insertion.
#[derive(Debug, Default)]
pub struct SeenIdentifiers {
    function_names: HashSet<String>,
    function_ids: HashSet<String>,
    enum_ids: HashSet<String>,
}

impl SeenIdentifiers {
    pub fn check_function_name(
        &mut self,
        name: &str,
        position: Option<Position>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if !self.function_names.insert(name.to_uppercase()) {
            diagnostics.push(Diagnostic::new(
                format!("Duplicate function name: {name}"),
                position,
            ));
        }
    }

    pub fn check_function_id(
        &mut self,
        id: &str,
        position: Option<Position>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if !self.function_ids.insert(id.to_uppercase()) {
            diagnostics.push(Diagnostic::new(
                format!("Duplicate function id: {id}"),
                position,
            ));
        }
    }

    pub fn check_enum_id(
        &mut self,
        id: &str,
        position: Option<Position>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if !self.enum_ids.insert(id.to_uppercase()) {
            diagnostics.push(Diagnostic::new(
                format!("Duplicate enum id: {id}"),
                position,
            ));
        }
    }
}

/// Check an id against the character-set and length rules. `what` names
/// the declaration kind in the message ("Function", "Enum").
pub fn check_id(
    id: &str,
    what: &str,
    position: Option<Position>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if id.is_empty() {
        diagnostics.push(Diagnostic::new(format!("{what} id is empty"), position));
        return;
    }
    if !ID_PATTERN.is_match(id) {
        diagnostics.push(Diagnostic::new(
            format!("{what} id contains invalid characters: {id}"),
            position,
        ));
    }
    if id.chars().count() > MAX_IDENTIFIER_LENGTH {
        diagnostics.push(Diagnostic::new(
            format!("{what} id exceeds {MAX_IDENTIFIER_LENGTH} characters: {id}"),
            position,
        ));
    }
}

/// Check a display name: Unicode letter start, then letters, digits,
/// `.` or `_`.
pub fn check_name(name: &str, position: Option<Position>, diagnostics: &mut Vec<Diagnostic>) {
    if !NAME_PATTERN.is_match(name) {
        diagnostics.push(Diagnostic::new(
            format!("Function name contains invalid characters: {name}"),
            position,
        ));
    }
    if name.chars().count() > MAX_IDENTIFIER_LENGTH {
        diagnostics.push(Diagnostic::new(
            format!("Function name exceeds {MAX_IDENTIFIER_LENGTH} characters: {name}"),
            position,
        ));
    }
}

/// Cross-validate option tags against the trailing-parameter role.
pub fn check_option_combinations(
    doc: &DocInfo,
    role: Option<TrailingRole>,
    position: Option<Position>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let has_context = role.is_some() || doc.stream_tag || doc.cancelable_tag;
    if !has_context {
        let address_tag = if doc.requires_address_tag {
            Some("requiresAddress")
        } else if doc.requires_parameter_addresses_tag {
            Some("requiresParameterAddresses")
        } else {
            None
        };
        if let Some(tag) = address_tag {
            diagnostics.push(Diagnostic::new(
                format!(
                    "@{tag} requires the function to be streaming, cancelable, or take an invocation parameter"
                ),
                position,
            ));
        }
    }

    if doc.linked_entity_load_service_tag {
        let streaming = doc.stream_tag || role.is_some_and(TrailingRole::is_streaming);
        // Fixed precedence: the first conflicting option is named.
        let conflicts = [
            (doc.exclude_from_auto_complete_tag, "excludeFromAutoComplete"),
            (doc.volatile_tag, "volatile"),
            (streaming, "stream"),
            (doc.requires_address_tag, "requiresAddress"),
            (
                doc.requires_parameter_addresses_tag,
                "requiresParameterAddresses",
            ),
            (doc.captures_calling_object_tag, "capturesCallingObject"),
        ];
        if let Some((_, name)) = conflicts.iter().find(|(set, _)| *set) {
            diagnostics.push(Diagnostic::new(
                format!("@linkedEntityLoadService cannot be combined with @{name}"),
                position,
            ));
        }
    }
}
