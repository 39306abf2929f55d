//! Custom function metadata extraction for spreadsheet add-ins.
//!
//! Given an already-parsed source tree with doc-comment annotations,
//! `gridfn` locates `@customfunction`/`@customenum` declarations and
//! assembles the registration document a spreadsheet host consumes:
//! function ids and display names, parameter types with dimensionality
//! and repeating/optional flags, result shape, behavior options, and a
//! diagnostics list. Extraction never fails; malformed declarations
//! produce best-effort records next to their diagnostics.
//!
//! ```
//! use gridfn::ast::SourceModule;
//!
//! let module = SourceModule::new("functions.ts");
//! let result = gridfn::extract(&module);
//! assert!(result.functions.is_empty());
//! assert!(!result.has_diagnostics());
//! ```

// Export modules for library usage
pub mod ast;
pub mod core;
pub mod extraction;
pub mod io;

// Re-export commonly used types
pub use crate::core::{
    Association, CellValueKind, Diagnostic, Dimensionality, EnumKind, EnumMetadata, EnumValue,
    EnumValueMetadata, Error, ExtractionResult, FunctionMetadata, FunctionOptions,
    ParameterMetadata, Result, ResultMetadata, ValueType,
};

pub use crate::extraction::{classify::TrailingRole, extract, resolve::EnumContext, tags::TagKind};

pub use crate::io::{to_json_string, MetadataWriter};
