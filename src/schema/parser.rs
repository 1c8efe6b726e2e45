use super::types::{FieldDefinition, SchemaDefinition, TypeTag};
use crate::error::{FlatDbError, Result};
use std::path::Path;

/// Parse a schema file (a YAML mapping of field name to type tag) into a
/// SchemaDefinition, preserving document order.
pub fn parse_schema(path: &Path) -> Result<SchemaDefinition> {
    let content = std::fs::read_to_string(path)?;
    parse_schema_str(&content)
}

/// Parse a schema YAML string into a SchemaDefinition.
///
/// ```yaml
/// name: string
/// age: number
/// email: string
/// ```
pub fn parse_schema_str(content: &str) -> Result<SchemaDefinition> {
    let mapping: serde_yaml::Mapping = serde_yaml::from_str(content)?;

    let mut fields = Vec::with_capacity(mapping.len());
    for (key, value) in &mapping {
        let name = key.as_str().ok_or_else(|| {
            FlatDbError::Schema(format!("Field name must be a string, got: {key:?}"))
        })?;
        let tag: TypeTag = serde_yaml::from_value(value.clone()).map_err(|_| {
            FlatDbError::Schema(format!("Unrecognized type tag {value:?} for field '{name}'"))
        })?;
        fields.push(FieldDefinition {
            name: name.to_string(),
            field_type: tag,
        });
    }

    Ok(SchemaDefinition { fields })
}
