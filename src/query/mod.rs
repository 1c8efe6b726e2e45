use crate::codec::{value_to_text, Record};
use serde_json::Value;

/// A partial record: a subset of field/value pairs used to select records
/// for read, update, and delete operations.
pub type Query = serde_json::Map<String, Value>;

/// True iff the record satisfies every key/value pair in the query,
/// compared as text. A query value of 25 only matches the stored text
/// "25"; there is no type-aware comparison. The empty query matches
/// everything.
pub fn matches(query: &Query, record: &Record) -> bool {
    query.iter().all(|(key, expected)| {
        record
            .get(key)
            .is_some_and(|actual| value_to_text(actual) == value_to_text(expected))
    })
}
