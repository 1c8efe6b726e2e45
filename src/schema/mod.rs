mod parser;
mod types;

pub use parser::{parse_schema, parse_schema_str};
pub use types::{FieldDefinition, SchemaDefinition, TypeTag};

use crate::error::{FlatDbError, Result};
use std::collections::HashSet;

/// A compiled, immutable schema.
///
/// Produced once from a SchemaDefinition and consulted by every operation;
/// holds the field order that drives encoding and decoding.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDefinition>,
}

impl Schema {
    /// Compile a definition into a schema, rejecting duplicate field names.
    pub fn compile(definition: SchemaDefinition) -> Result<Schema> {
        let mut seen = HashSet::new();
        for field in &definition.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(FlatDbError::Schema(format!(
                    "Duplicate field name '{}'",
                    field.name
                )));
            }
        }
        Ok(Schema {
            fields: definition.fields,
        })
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
