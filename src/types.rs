//! Core data model for rows fed into the cross-tabulation builder.
//!
//! A [`DataSet`] holds typed [`Value`] rows shaped by a [`Schema`]. The builder reads categorical
//! cells by column name and compares their [category code](Value::category_code) against a
//! column's domain.

/// Logical data type for a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean (`true/false`, `yes/no`, `1/0`).
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name used by the builder and the domain registry.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
    /// Alternative source names accepted when matching CSV headers or JSON keys.
    pub aliases: Vec<String>,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            aliases: Vec::new(),
        }
    }

    /// Add an alternative source name (e.g. the raw `famsize` header for `famSize`).
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Returns `true` if `source_name` is this field's name or one of its aliases.
    pub fn matches_source(&self, source_name: &str) -> bool {
        self.name == source_name || self.aliases.iter().any(|a| a == source_name)
    }
}

/// A list of fields describing the expected shape of incoming data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The string this value contributes when matched against a categorical domain.
    ///
    /// - `Null` has no code.
    /// - `Utf8` is used as-is; `Int64` is rendered in decimal.
    /// - `Bool` maps to the yes/no domain codes (`"yes"` / `"no"`).
    /// - `Float64` only has a code when finite and integral (`2.0` → `"2"`).
    pub fn category_code(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Utf8(s) => Some(s.clone()),
            Value::Int64(v) => Some(v.to_string()),
            Value::Bool(true) => Some("yes".to_string()),
            Value::Bool(false) => Some("no".to_string()),
            Value::Float64(v) if v.is_finite() && v.fract() == 0.0 => {
                // `+ 0.0` folds -0.0 into 0.0.
                Some(format!("{:.0}", v + 0.0))
            }
            Value::Float64(_) => None,
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (`row`, `column`), or `None` if either is out of range or the column is unknown.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.schema.index_of(column)?;
        self.rows.get(row)?.get(idx)
    }
}
