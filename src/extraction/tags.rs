//! Doc-tag interpretation.
//!
//! Pulls the recognized tags off a declaration's doc comment: the
//! custom-function/custom-enum marker with its optional id/name
//! override, description and help-url text, behavior-flag tags, and the
//! per-parameter `@param` tables (description, bracket optionality,
//! `{Type}` annotation). Tag names are matched case-insensitively
//! through one closed table; unrecognized tags are inert.

use crate::ast::{DocComment, DocTag, KeywordType, TypeNode};
use crate::core::types::Dimensionality;
use std::collections::HashMap;

/// Recognized doc tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    CustomFunction,
    CustomEnum,
    HelpUrl,
    Param,
    Returns,
    Cancelable,
    RequiresAddress,
    RequiresParameterAddresses,
    Stream,
    Volatile,
    ExcludeFromAutoComplete,
    LinkedEntityLoadService,
    CapturesCallingObject,
}

impl TagKind {
    /// Single lowercase name → variant table. Adding a recognized tag
    /// is a one-line edit here.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "customfunction" => Some(Self::CustomFunction),
            "customenum" => Some(Self::CustomEnum),
            "helpurl" => Some(Self::HelpUrl),
            "param" => Some(Self::Param),
            "return" | "returns" => Some(Self::Returns),
            "cancelable" => Some(Self::Cancelable),
            "requiresaddress" => Some(Self::RequiresAddress),
            "requiresparameteraddresses" => Some(Self::RequiresParameterAddresses),
            "stream" | "streaming" => Some(Self::Stream),
            "volatile" => Some(Self::Volatile),
            "excludefromautocomplete" => Some(Self::ExcludeFromAutoComplete),
            "linkedentityloadservice" => Some(Self::LinkedEntityLoadService),
            "capturescallingobject" => Some(Self::CapturesCallingObject),
            _ => None,
        }
    }
}

/// First tag of the given kind, if any.
pub fn find_tag(doc: Option<&DocComment>, kind: TagKind) -> Option<&DocTag> {
    doc?.tags
        .iter()
        .find(|tag| TagKind::from_name(&tag.name) == Some(kind))
}

pub fn has_tag(doc: Option<&DocComment>, kind: TagKind) -> bool {
    find_tag(doc, kind).is_some()
}

/// Type annotation parsed from `{...}` doc text.
#[derive(Debug, Clone, PartialEq)]
pub struct DocType {
    /// Outer name as written, generic arguments and array suffixes
    /// stripped.
    pub name: String,
    /// Text of the single generic argument, array markers stripped.
    pub inner_name: Option<String>,
    /// Matrix when the generic argument text carries exactly one `[]`.
    pub inner_dimensionality: Dimensionality,
    /// Structural rendering of the annotation.
    pub node: TypeNode,
}

/// Everything the interpreter extracts from one function's doc comment.
#[derive(Debug, Clone, Default)]
pub struct DocInfo {
    pub description: Option<String>,
    pub help_url: Option<String>,
    /// First whitespace token of the custom tag's comment.
    pub id_override: Option<String>,
    /// Second whitespace token of the custom tag's comment.
    pub name_override: Option<String>,
    /// Per-parameter doc entries keyed by parameter name.
    pub params: HashMap<String, ParamDoc>,
    pub returns: Option<DocType>,
    pub cancelable_tag: bool,
    pub stream_tag: bool,
    pub volatile_tag: bool,
    pub requires_address_tag: bool,
    pub requires_parameter_addresses_tag: bool,
    pub exclude_from_auto_complete_tag: bool,
    pub linked_entity_load_service_tag: bool,
    pub captures_calling_object_tag: bool,
}

/// Doc entry for one parameter.
#[derive(Debug, Clone, Default)]
pub struct ParamDoc {
    pub description: Option<String>,
    pub optional: bool,
    pub doc_type: Option<DocType>,
}

/// Interpret a declaration's doc comment. `marker` selects which custom
/// tag supplies the id/name override string.
pub fn interpret(doc: Option<&DocComment>, marker: TagKind) -> DocInfo {
    let mut info = DocInfo {
        description: doc.map(|d| d.text.trim()).filter(|t| !t.is_empty()).map(String::from),
        ..Default::default()
    };

    let Some(doc) = doc else {
        return info;
    };

    for tag in &doc.tags {
        let Some(kind) = TagKind::from_name(&tag.name) else {
            continue;
        };
        match kind {
            k if k == marker => {
                let mut tokens = tag.comment.split_whitespace();
                info.id_override = tokens.next().map(String::from);
                info.name_override = tokens.next().map(String::from);
            }
            TagKind::HelpUrl => {
                let url = tag.comment.trim();
                if !url.is_empty() && info.help_url.is_none() {
                    info.help_url = Some(url.to_string());
                }
            }
            TagKind::Param => {
                if let Some((name, param)) = parse_param_tag(&tag.comment) {
                    info.params.entry(name).or_insert(param);
                }
            }
            TagKind::Returns => {
                if info.returns.is_none() {
                    info.returns = brace_text(&tag.comment).and_then(parse_doc_type);
                }
            }
            TagKind::Cancelable => info.cancelable_tag = true,
            TagKind::Stream => info.stream_tag = true,
            TagKind::Volatile => info.volatile_tag = true,
            TagKind::RequiresAddress => info.requires_address_tag = true,
            TagKind::RequiresParameterAddresses => info.requires_parameter_addresses_tag = true,
            TagKind::ExcludeFromAutoComplete => info.exclude_from_auto_complete_tag = true,
            TagKind::LinkedEntityLoadService => info.linked_entity_load_service_tag = true,
            TagKind::CapturesCallingObject => info.captures_calling_object_tag = true,
            _ => {}
        }
    }

    info
}

/// Parse one `@param` comment: `{Type} name description`,
/// `{Type} [name] description`, or the same without the type block.
/// Returns the parameter name and its doc entry; entries with no name
/// are dropped.
fn parse_param_tag(comment: &str) -> Option<(String, ParamDoc)> {
    let mut rest = comment.trim_start();

    let doc_type = if rest.starts_with('{') {
        let (inside, after) = split_brace_block(rest)?;
        rest = after.trim_start();
        parse_doc_type(inside)
    } else {
        None
    };

    let (name, optional, after_name) = if let Some(stripped) = rest.strip_prefix('[') {
        let end = stripped.find(']')?;
        let inside = &stripped[..end];
        // A default value rides along as `[name=value]`.
        let name = inside.split('=').next().unwrap_or("").trim();
        (name.to_string(), true, &stripped[end + 1..])
    } else {
        let name: String = rest.chars().take_while(|c| !c.is_whitespace()).collect();
        let after = &rest[name.len()..];
        (name, false, after)
    };

    if name.is_empty() {
        return None;
    }

    let description = after_name
        .trim_start()
        .strip_prefix('-')
        .unwrap_or(after_name)
        .trim();
    let description = (!description.is_empty()).then(|| description.to_string());

    Some((
        name,
        ParamDoc {
            description,
            optional,
            doc_type,
        },
    ))
}

/// Extract the text of a leading `{...}` block, if present.
fn brace_text(comment: &str) -> Option<&str> {
    let trimmed = comment.trim_start();
    trimmed
        .starts_with('{')
        .then(|| split_brace_block(trimmed).map(|(inside, _)| inside))
        .flatten()
}

/// Split `{...}rest` into the brace interior and the remainder,
/// honoring nested braces.
fn split_brace_block(text: &str) -> Option<(&str, &str)> {
    debug_assert!(text.starts_with('{'));
    let mut depth = 0usize;
    for (index, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&text[1..index], &text[index + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse annotation text like `number`, `string[][]`, or
/// `StreamingInvocation<number[]>` into a [`DocType`].
pub fn parse_doc_type(text: &str) -> Option<DocType> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Peel outer array suffixes off the full annotation first.
    let mut base = trimmed;
    while let Some(elem) = base.strip_suffix("[]") {
        base = elem.trim_end();
    }

    let (name, inner_text) = match (base.find('<'), base.rfind('>')) {
        (Some(open), Some(close)) if close > open => {
            (base[..open].trim(), Some(base[open + 1..close].trim()))
        }
        _ => (base, None),
    };
    if name.is_empty() {
        return None;
    }

    let inner_dimensionality = match inner_text {
        Some(inner) if inner.matches("[]").count() == 1 => Dimensionality::Matrix,
        _ => Dimensionality::Scalar,
    };
    let inner_name = inner_text.map(|inner| inner.replace("[]", "").trim().to_string());

    Some(DocType {
        name: name.to_string(),
        inner_name,
        inner_dimensionality,
        node: node_from_text(trimmed),
    })
}

/// Structural rendering of annotation text.
fn node_from_text(text: &str) -> TypeNode {
    let trimmed = text.trim();
    if let Some(elem) = trimmed.strip_suffix("[]") {
        return TypeNode::Array(Box::new(node_from_text(elem)));
    }
    if let (Some(open), Some(close)) = (trimmed.find('<'), trimmed.rfind('>')) {
        if close > open {
            let name = trimmed[..open].trim().to_string();
            let arg = node_from_text(&trimmed[open + 1..close]);
            return TypeNode::Reference {
                name,
                type_args: vec![arg],
            };
        }
    }
    match trimmed {
        "number" => TypeNode::Keyword(KeywordType::Number),
        "string" => TypeNode::Keyword(KeywordType::String),
        "boolean" => TypeNode::Keyword(KeywordType::Boolean),
        "any" => TypeNode::Keyword(KeywordType::Any),
        "void" => TypeNode::Keyword(KeywordType::Void),
        "unknown" => TypeNode::Keyword(KeywordType::Unknown),
        "object" => TypeNode::Keyword(KeywordType::Object),
        other => TypeNode::reference(other),
    }
}
