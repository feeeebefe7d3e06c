//! Schema definition and loading.
//!
//! A schema maps field names to rule identifiers. Schemas can be built in
//! code or loaded from YAML/JSON documents, which are checked against an
//! embedded JSON Schema first.

mod document;
mod parser;

pub use document::validate_document;
pub use parser::{Schema, SchemaError};
