use crate::error::{FlatDbError, Result};
use crate::schema::{Schema, TypeTag};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// Result of validating a record against a schema.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a record field-by-field against the schema.
/// Raw values must already match their declared kind; no coercion is
/// performed before checking.
pub fn validate_record(schema: &Schema, record: &serde_json::Map<String, Value>) -> ValidationResult {
    let mut result = ValidationResult { errors: Vec::new() };

    for field in schema.fields() {
        check_field(&field.name, field.field_type, record.get(&field.name), &mut result);
    }

    result
}

/// Validate a record, converting any failure into a single error carrying
/// the full per-field detail.
pub fn validate_record_strict(
    schema: &Schema,
    record: &serde_json::Map<String, Value>,
) -> Result<()> {
    let result = validate_record(schema, record);

    if !result.is_ok() {
        return Err(FlatDbError::Validation(format!(
            "Record validation failed:\n  - {}",
            result.errors.join("\n  - ")
        )));
    }

    Ok(())
}

fn check_field(name: &str, tag: TypeTag, value: Option<&Value>, result: &mut ValidationResult) {
    match tag {
        TypeTag::Any => {}
        TypeTag::Undefined => {
            if let Some(val) = value {
                result.errors.push(format!(
                    "Field '{name}' expected no value, got {}",
                    type_name(val)
                ));
            }
        }
        TypeTag::Null => match value {
            Some(Value::Null) => {}
            Some(val) => result.errors.push(format!(
                "Field '{name}' expected null, got {}",
                type_name(val)
            )),
            None => result.errors.push(format!("Field '{name}' is missing")),
        },
        TypeTag::String => match value {
            Some(Value::String(_)) => {}
            Some(val) => result.errors.push(format!(
                "Field '{name}' expected string, got {}",
                type_name(val)
            )),
            None => result.errors.push(format!("Field '{name}' is missing")),
        },
        TypeTag::Number => match value {
            Some(Value::Number(_)) => {}
            Some(val) => result.errors.push(format!(
                "Field '{name}' expected number, got {}",
                type_name(val)
            )),
            None => result.errors.push(format!("Field '{name}' is missing")),
        },
        TypeTag::Boolean => match value {
            Some(Value::Bool(_)) => {}
            Some(val) => result.errors.push(format!(
                "Field '{name}' expected boolean, got {}",
                type_name(val)
            )),
            None => result.errors.push(format!("Field '{name}' is missing")),
        },
        TypeTag::Bigint => match value {
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => {}
            Some(val) => result.errors.push(format!(
                "Field '{name}' expected integer, got {}",
                type_name(val)
            )),
            None => result.errors.push(format!("Field '{name}' is missing")),
        },
        TypeTag::Date => match value {
            Some(Value::String(s)) if is_date_text(s) => {}
            Some(Value::String(s)) => result
                .errors
                .push(format!("Field '{name}' is not a valid date: '{s}'")),
            Some(val) => result.errors.push(format!(
                "Field '{name}' expected date string, got {}",
                type_name(val)
            )),
            None => result.errors.push(format!("Field '{name}' is missing")),
        },
    }
}

// Accepts RFC 3339 datetimes and plain calendar dates.
fn is_date_text(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok() || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
