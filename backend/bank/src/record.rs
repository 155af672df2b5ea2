use serde_json::{Map, Value};

/// One catalog item. Schemas are not enforced on the record itself, the
/// owning [`Collection`] only declares which fields queries may touch.
pub type Record = Map<String, Value>;

/// How a declared field compares when sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Fields eligible for free-text matching.
    pub searchable: &'static [&'static str],
    pub fields: &'static [(&'static str, FieldKind)],
}

impl Schema {
    pub fn kind(&self, field: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
    }

    pub fn declares(&self, field: &str) -> bool {
        self.kind(field).is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Collection {
    name: &'static str,
    schema: Schema,
    records: Vec<Record>,
}

impl Collection {
    pub fn new(name: &'static str, schema: Schema, records: Vec<Record>) -> Self {
        Self {
            name,
            schema,
            records,
        }
    }

    /// Builds a collection from a JSON array, skipping anything that is not an object.
    pub fn from_json(name: &'static str, schema: Schema, value: Value) -> Self {
        let records = match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(record) => Some(record),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Self::new(name, schema, records)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose string `field` equals `value` exactly.
    pub fn find(&self, field: &str, value: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.get(field).and_then(Value::as_str) == Some(value))
    }
}
