pub mod output;

pub use output::{to_json_string, MetadataDocument, MetadataWriter};
