//! Parsed source tree contract.
//!
//! The extraction engine never lexes or parses source text. An external
//! front end produces this owned tree — declarations with attached doc
//! comments, structural type annotations, and source positions — and the
//! engine walks it read-only. Type references are carried exactly as
//! written: alias and namespace resolution happens (or doesn't) upstream.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Zero-based source position. Rendered one-based in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// One parsed source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceModule {
    /// Path of the file the tree was parsed from.
    pub path: PathBuf,
    /// Direct children of the file root, in source order.
    pub items: Vec<Item>,
}

impl SourceModule {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            items: Vec::new(),
        }
    }
}

/// A top-level item. Declarations nested inside statement bodies arrive
/// under `Statement` and are never considered by the collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Item {
    Enum(EnumDecl),
    Function(FunctionDecl),
    Statement(Vec<Item>),
}

/// An enum declaration with its members in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub doc: Option<DocComment>,
    pub members: Vec<EnumMember>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    /// Explicit initializer value, if the member has one.
    pub value: Option<MemberValue>,
    /// Leading doc text of the member, used as its tooltip.
    pub doc: Option<String>,
    pub position: Option<Position>,
}

/// Literal value of an enum member initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemberValue {
    Number(f64),
    Text(String),
}

/// A function declaration with its signature and doc comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub doc: Option<DocComment>,
    pub parameters: Vec<ParamDecl>,
    pub return_type: Option<TypeNode>,
    pub position: Option<Position>,
}

/// A declared parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    /// Structural type annotation, if the parameter has one.
    pub type_node: Option<TypeNode>,
    /// Question-token optionality.
    pub optional: bool,
    /// Whether the parameter declares a default value.
    pub has_default: bool,
    pub position: Option<Position>,
}

/// Doc comment attached to a declaration: leading free text plus the
/// tag entries in source order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocComment {
    /// Description text preceding the first tag.
    pub text: String,
    pub tags: Vec<DocTag>,
}

/// One doc tag: name without the leading `@`, raw comment text after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocTag {
    pub name: String,
    pub comment: String,
    pub position: Option<Position>,
}

/// Structural type annotation.
///
/// Union and tuple shapes are carried so the resolver can apply its
/// permissive fallback; their elements are never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeNode {
    Keyword(KeywordType),
    Reference {
        name: String,
        type_args: Vec<TypeNode>,
    },
    Array(Box<TypeNode>),
    Union(Vec<TypeNode>),
    Tuple(Vec<TypeNode>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordType {
    Number,
    String,
    Boolean,
    Any,
    Void,
    Unknown,
    Object,
}

impl TypeNode {
    /// Reference shorthand with no type arguments.
    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    /// The referenced name, for reference nodes.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            TypeNode::Reference { name, .. } => Some(name),
            _ => None,
        }
    }

    /// True for `T[]` and for `Array<T>` with exactly one argument.
    pub fn is_array(&self) -> bool {
        match self {
            TypeNode::Array(_) => true,
            TypeNode::Reference { name, type_args } => name == "Array" && type_args.len() == 1,
            _ => false,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeNode::Keyword(KeywordType::Void))
    }
}
