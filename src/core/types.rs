//! Metadata document model.
//!
//! Wire-contract types for the extracted document. Optional fields are
//! absent from the point of computation and stay absent on the wire
//! (`skip_serializing_if`); consumers treat a missing field as its
//! stated default, never as a null marker.

use crate::ast::Position;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Semantic value type of a parameter or result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    String,
    Boolean,
    #[default]
    Any,
}

/// Whether a value is a single scalar or a two-dimensional grid. Exact
/// shape is never tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    #[default]
    Scalar,
    Matrix,
}

/// Kind of values a custom enum holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumKind {
    Number,
    String,
}

impl EnumKind {
    pub fn value_type(self) -> ValueType {
        match self {
            EnumKind::Number => ValueType::Number,
            EnumKind::String => ValueType::String,
        }
    }
}

/// Cell-value wrapper variants accepted as parameter types.
///
/// Each supported variant maps to a semantic basic type; the variant
/// name itself is recorded on the parameter so hosts can restore the
/// original wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellValueKind {
    CellValue,
    BooleanCellValue,
    DoubleCellValue,
    StringCellValue,
    FormattedNumberCellValue,
    EntityCellValue,
    ErrorCellValue,
    LinkedEntityCellValue,
    LocalImageCellValue,
    WebImageCellValue,
    ArrayCellValue,
    EmptyCellValue,
    ValueTypeNotAvailableCellValue,
}

impl CellValueKind {
    /// Single name → variant table. Adding a recognized reference name
    /// is a one-line edit here.
    pub fn from_reference_name(name: &str) -> Option<Self> {
        let bare = name.strip_prefix("CustomFunctions.").unwrap_or(name);
        match bare {
            "CellValue" => Some(Self::CellValue),
            "BooleanCellValue" => Some(Self::BooleanCellValue),
            "DoubleCellValue" => Some(Self::DoubleCellValue),
            "StringCellValue" => Some(Self::StringCellValue),
            "FormattedNumberCellValue" => Some(Self::FormattedNumberCellValue),
            "EntityCellValue" => Some(Self::EntityCellValue),
            "ErrorCellValue" => Some(Self::ErrorCellValue),
            "LinkedEntityCellValue" => Some(Self::LinkedEntityCellValue),
            "LocalImageCellValue" => Some(Self::LocalImageCellValue),
            "WebImageCellValue" => Some(Self::WebImageCellValue),
            "ArrayCellValue" => Some(Self::ArrayCellValue),
            "EmptyCellValue" => Some(Self::EmptyCellValue),
            "ValueTypeNotAvailableCellValue" => Some(Self::ValueTypeNotAvailableCellValue),
            _ => None,
        }
    }

    /// Semantic basic type the wrapper carries.
    pub fn basic_type(self) -> ValueType {
        match self {
            Self::BooleanCellValue => ValueType::Boolean,
            Self::DoubleCellValue | Self::FormattedNumberCellValue => ValueType::Number,
            Self::StringCellValue => ValueType::String,
            _ => ValueType::Any,
        }
    }

    /// Variants hosts cannot accept as declared parameter types.
    pub fn is_supported(self) -> bool {
        !matches!(
            self,
            Self::ArrayCellValue | Self::EmptyCellValue | Self::ValueTypeNotAvailableCellValue
        )
    }
}

/// One emitted parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Present only when `matrix`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensionality: Option<Dimensionality>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub repeating: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_value_type: Option<CellValueKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_enum_type: Option<String>,
}

impl Default for ParameterMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            value_type: ValueType::Any,
            dimensionality: None,
            optional: false,
            repeating: false,
            cell_value_type: None,
            custom_enum_type: None,
        }
    }
}

/// Result shape; the whole field is dropped from the function record
/// when both entries hold their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensionality: Option<Dimensionality>,
}

impl ResultMetadata {
    pub fn is_default(&self) -> bool {
        self.value_type.is_none() && self.dimensionality.is_none()
    }
}

/// Behavior flags; false flags are dropped, and the whole block is
/// dropped when every flag is false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionOptions {
    #[serde(default, skip_serializing_if = "is_false")]
    pub cancelable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_address: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_stream_address: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub stream: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub volatile: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_parameter_addresses: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_stream_parameter_addresses: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclude_from_auto_complete: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub linked_entity_load_service: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub captures_calling_object: bool,
}

impl FunctionOptions {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// One registered custom function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionMetadata {
    /// Case-normalized identifier used for host registration.
    pub id: String,
    /// Display name; equals `id` unless overridden.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
    pub parameters: Vec<ParameterMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<FunctionOptions>,
}

/// Literal value of an emitted enum member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Number(f64),
    Text(String),
}

impl Serialize for EnumValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Integral values stay integers on the wire.
            EnumValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            EnumValue::Number(n) => serializer.serialize_f64(*n),
            EnumValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueMetadata {
    pub name: String,
    pub value: EnumValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// One registered custom enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMetadata {
    pub id: String,
    #[serde(rename = "type")]
    pub value_kind: EnumKind,
    pub values: Vec<EnumValueMetadata>,
}

/// Non-fatal finding attached to a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{} ({},{})", self.message, pos.line + 1, pos.column + 1),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Maps a generated id back to the declaration it came from, for
/// downstream code generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    pub source_file: PathBuf,
    pub declared_name: String,
    pub id: String,
}

/// Everything one extraction call produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub functions: Vec<FunctionMetadata>,
    pub enums: Vec<EnumMetadata>,
    pub diagnostics: Vec<Diagnostic>,
    pub associations: Vec<Association>,
}

impl ExtractionResult {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
