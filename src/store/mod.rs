use crate::codec::{self, Record};
use crate::error::{FlatDbError, Result};
use crate::query::{self, Query};
use crate::schema::{Schema, SchemaDefinition};
use crate::validation;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The main entry point. A store is bound to one flat file; every
/// operation loads the entire file, works on the decoded records, and (for
/// mutations) rewrites the whole file.
///
/// Mutating operations take `&mut self`, so two threads cannot interleave
/// a read-modify-rewrite cycle on the same instance. Separate instances or
/// processes pointed at the same file are not protected and can lose
/// updates.
pub struct Store {
    path: PathBuf,
    schema: Option<Schema>,
}

impl Store {
    /// Bind a store to `base_dir/file_name`. The file is not created until
    /// the first write.
    pub fn new(base_dir: impl AsRef<Path>, file_name: &str) -> Store {
        Store {
            path: base_dir.as_ref().join(file_name),
            schema: None,
        }
    }

    /// Compile and install the schema, replacing any previous one, and
    /// return the compiled schema. Must be called before any data
    /// operation. Re-defining does not re-validate or migrate records
    /// already on disk.
    pub fn define_schema(&mut self, definition: SchemaDefinition) -> Result<&Schema> {
        let schema = Schema::compile(definition)?;
        Ok(self.schema.insert(schema))
    }

    /// The resolved file path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn schema(&self) -> Result<&Schema> {
        self.schema
            .as_ref()
            .ok_or_else(|| FlatDbError::Schema("Schema not defined".into()))
    }

    /// Read and decode the whole file. A missing file reads as empty.
    fn load(&self) -> Result<Vec<Record>> {
        let schema = self.schema()?;
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(codec::decode_all(&contents, schema))
    }

    /// Re-encode every record and overwrite the file. Each line is
    /// newline-terminated so a later append can never merge lines.
    fn rewrite(&self, records: &[Record]) -> Result<()> {
        let schema = self.schema()?;
        let mut out = String::new();
        for record in records {
            out.push_str(&codec::encode(record, schema));
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }

    fn append_lines(&self, lines: &[String]) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        for line in lines {
            writeln!(file, "{line}")?;
        }
        Ok(())
    }

    /// Validate a record against the schema and append it to the file.
    /// On validation failure nothing is written.
    pub fn insert(&mut self, record: Value) -> Result<()> {
        let schema = self.schema()?;
        let record = as_object(record)?;
        validation::validate_record_strict(schema, &record)?;
        self.append_lines(&[codec::encode(&record, schema)])
    }

    /// Insert a batch of records. Every record is validated before any is
    /// written, so a single invalid record aborts the batch with the file
    /// untouched.
    pub fn insert_many(&mut self, records: Vec<Value>) -> Result<()> {
        let schema = self.schema()?;

        let mut lines = Vec::with_capacity(records.len());
        for record in records {
            let record = as_object(record)?;
            validation::validate_record_strict(schema, &record)?;
            lines.push(codec::encode(&record, schema));
        }

        self.append_lines(&lines)
    }

    /// Decode and return every record. Values are text regardless of the
    /// declared field types.
    pub fn get_all(&self) -> Result<Vec<Record>> {
        self.load()
    }

    /// Return the first record fully matching the query, or None.
    pub fn find_one(&self, query: Value) -> Result<Option<Record>> {
        let query = as_object(query)?;
        let records = self.load()?;
        Ok(records.into_iter().find(|r| query::matches(&query, r)))
    }

    /// Return every record fully matching the query, or None when nothing
    /// matches.
    pub fn find_all(&self, query: Value) -> Result<Option<Vec<Record>>> {
        let query = as_object(query)?;
        let found: Vec<Record> = self
            .load()?
            .into_iter()
            .filter(|r| query::matches(&query, r))
            .collect();

        if found.is_empty() {
            Ok(None)
        } else {
            Ok(Some(found))
        }
    }

    /// Apply the update fields to the first record fully matching the
    /// query, then rewrite the file with all records in their original
    /// order.
    pub fn update_one(&mut self, query: Value, update: Value) -> Result<()> {
        let query = as_object(query)?;
        let update = as_object(update)?;

        let mut records = self.load()?;
        let target = records
            .iter_mut()
            .find(|r| query::matches(&query, r))
            .ok_or_else(|| not_found(&query))?;

        apply_update(target, &update);
        self.rewrite(&records)
    }

    /// Apply the update fields to every record fully matching the query.
    pub fn update_many(&mut self, query: Value, update: Value) -> Result<()> {
        let query = as_object(query)?;
        let update = as_object(update)?;

        let mut records = self.load()?;
        let mut matched = 0;
        for record in records.iter_mut().filter(|r| query::matches(&query, r)) {
            apply_update(record, &update);
            matched += 1;
        }

        if matched == 0 {
            return Err(not_found(&query));
        }
        self.rewrite(&records)
    }

    /// Remove the first record fully matching the query.
    pub fn delete_one(&mut self, query: Value) -> Result<()> {
        let query = as_object(query)?;

        let mut records = self.load()?;
        let position = records
            .iter()
            .position(|r| query::matches(&query, r))
            .ok_or_else(|| not_found(&query))?;

        records.remove(position);
        self.rewrite(&records)
    }

    /// Remove every record fully matching the query. An empty query
    /// matches, and removes, everything.
    pub fn delete_many(&mut self, query: Value) -> Result<()> {
        let query = as_object(query)?;

        let records = self.load()?;
        let total = records.len();
        let kept: Vec<Record> = records
            .into_iter()
            .filter(|r| !query::matches(&query, r))
            .collect();

        if kept.len() == total {
            return Err(not_found(&query));
        }
        self.rewrite(&kept)
    }

    /// Overwrite the file with empty content.
    pub fn delete_all(&mut self) -> Result<()> {
        fs::write(&self.path, "")?;
        Ok(())
    }
}

fn as_object(value: Value) -> Result<Query> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(FlatDbError::Validation(format!(
            "Expected a JSON object, got {}",
            validation::type_name(&other)
        ))),
    }
}

fn not_found(query: &Query) -> FlatDbError {
    FlatDbError::NotFound {
        query: Value::Object(query.clone()).to_string(),
    }
}

fn apply_update(record: &mut Record, update: &Query) {
    for (key, value) in update {
        record.insert(key.clone(), value.clone());
    }
}
