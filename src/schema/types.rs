use serde::{Deserialize, Serialize};

/// Declared type of a single field.
///
/// Tags arriving through the textual schema format are parsed into this
/// enum, so an unrecognized tag fails at schema-construction time rather
/// than producing a permissive validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Bigint,
    Date,
    Undefined,
    Null,
    Any,
}

impl TypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Bigint => "bigint",
            TypeTag::Date => "date",
            TypeTag::Undefined => "undefined",
            TypeTag::Null => "null",
            TypeTag::Any => "any",
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a single field: its name and declared type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeTag,
}

/// An ordered schema definition as written by the caller.
///
/// The order fields are declared in is the column order on disk and the
/// decode order; it never changes for the lifetime of a store instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub fields: Vec<FieldDefinition>,
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field declaration. Declaration order is column order.
    pub fn field(mut self, name: &str, field_type: TypeTag) -> Self {
        self.fields.push(FieldDefinition {
            name: name.to_string(),
            field_type,
        });
        self
    }
}
