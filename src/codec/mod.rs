// Record codec - one record per line, field values joined by ", ".
// There is no quoting or escaping: a value containing the separator or a
// newline corrupts the line format.

use crate::schema::Schema;
use serde_json::Value;

/// The literal two-character field separator.
pub const FIELD_SEPARATOR: &str = ", ";

/// One logical row: a mapping from field name to value. Values read back
/// from storage are always strings.
pub type Record = serde_json::Map<String, Value>;

/// Convert a field value to its stored text form.
/// Strings are written verbatim, numbers and booleans via their display
/// form, null and missing values as the empty string.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Encode a record as a single line, reading fields in schema order.
pub fn encode(record: &Record, schema: &Schema) -> String {
    schema
        .fields()
        .iter()
        .map(|field| {
            record
                .get(&field.name)
                .map(value_to_text)
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

/// Decode a single line positionally against the schema's field order.
/// Missing trailing fields become null; extra fields are ignored.
pub fn decode(line: &str, schema: &Schema) -> Record {
    let mut parts = line.split(FIELD_SEPARATOR);
    let mut record = Record::new();

    for field in schema.fields() {
        let value = parts
            .next()
            .map(|s| Value::String(s.to_string()))
            .unwrap_or(Value::Null);
        record.insert(field.name.clone(), value);
    }

    record
}

/// Decode an entire file's contents. Empty lines (including the one after
/// a trailing newline) are skipped so they never surface as spurious
/// all-null records.
pub fn decode_all(contents: &str, schema: &Schema) -> Vec<Record> {
    contents
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let count = line.split(FIELD_SEPARATOR).count();
            if count != schema.field_count() {
                log::warn!(
                    "Line has {count} fields, schema expects {}: {line:?}",
                    schema.field_count()
                );
            }
            decode(line, schema)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaDefinition, TypeTag};
    use serde_json::json;

    fn test_schema() -> Schema {
        let def = SchemaDefinition::new()
            .field("name", TypeTag::String)
            .field("age", TypeTag::Number)
            .field("email", TypeTag::String);
        Schema::compile(def).unwrap()
    }

    #[test]
    fn test_encode_in_schema_order() {
        let schema = test_schema();
        // Record key order differs from schema order; schema order wins.
        let record = json!({ "email": "johndoe@example.com", "age": 25, "name": "John Doe" })
            .as_object()
            .unwrap()
            .clone();

        let line = encode(&record, &schema);
        assert_eq!(line, "John Doe, 25, johndoe@example.com");
    }

    #[test]
    fn test_encode_null_and_missing_as_empty() {
        let schema = test_schema();
        let record = json!({ "name": "John", "age": null })
            .as_object()
            .unwrap()
            .clone();

        assert_eq!(encode(&record, &schema), "John, , ");
    }

    #[test]
    fn test_decode_values_are_text() {
        let schema = test_schema();
        let record = decode("John Doe, 25, johndoe@example.com", &schema);

        assert_eq!(record["name"], json!("John Doe"));
        assert_eq!(record["age"], json!("25"));
        assert_eq!(record["email"], json!("johndoe@example.com"));
    }

    #[test]
    fn test_decode_pads_short_line_with_null() {
        let schema = test_schema();
        let record = decode("John Doe", &schema);

        assert_eq!(record["name"], json!("John Doe"));
        assert_eq!(record["age"], Value::Null);
        assert_eq!(record["email"], Value::Null);
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let schema = test_schema();
        let record = decode("a, b, c, d, e", &schema);
        assert_eq!(record.len(), 3);
        assert_eq!(record["email"], json!("c"));
    }

    #[test]
    fn test_decode_all_skips_empty_lines() {
        let schema = test_schema();
        let records = decode_all("A, 1, a@x\nB, 2, b@x\n", &schema);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["name"], json!("B"));
    }

    #[test]
    fn test_decode_all_empty_contents() {
        let schema = test_schema();
        assert!(decode_all("", &schema).is_empty());
        assert!(decode_all("\n\n", &schema).is_empty());
    }
}
