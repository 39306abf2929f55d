pub mod errors;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    Association, CellValueKind, Diagnostic, Dimensionality, EnumKind, EnumMetadata, EnumValue,
    EnumValueMetadata, ExtractionResult, FunctionMetadata, FunctionOptions, ParameterMetadata,
    ResultMetadata, ValueType,
};
