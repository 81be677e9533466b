use tracing::trace;

use super::column::Column;
use super::rules::{self, ColumnDescriptor};
use crate::parser::sql_parser::RawTable;

/// A named, ordered collection of classified columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Assemble a table from already-classified columns, keeping their order.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Table name as written in the schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The table's time axis: the first time column in declaration order.
    pub fn time_column(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_time_column())
    }

    /// Metric columns in declaration order.
    pub fn metrics(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_metric())
    }

    /// Categorical columns in declaration order.
    pub fn categoricals(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_categorical())
    }

    /// True when any column is a metric or a time axis.
    pub fn is_relevant(&self) -> bool {
        self.columns
            .iter()
            .any(|c| c.is_metric() || c.is_time_column())
    }
}

/// Classify one `(name, raw type)` pair. Total: unrecognized input yields no roles and `short`.
pub fn classify_column(name: &str, raw_type: &str) -> Column {
    let descriptor = ColumnDescriptor::new(name, raw_type);
    let unit = rules::infer_unit(&descriptor);
    let roles = rules::evaluate_roles(&descriptor);
    trace!(column = name, ?roles, %unit, "classified column");
    Column::new(name.to_string(), descriptor.data_type, roles, unit)
}

/// Classify every column of a parsed table, preserving declaration order.
pub fn classify_table(raw: &RawTable) -> Table {
    Table::new(
        raw.name.clone(),
        raw.columns
            .iter()
            .map(|c| classify_column(&c.name, &c.data_type))
            .collect(),
    )
}

/// Classify a whole parsed schema, preserving table order.
pub fn classify_schema(raw: &[RawTable]) -> Vec<Table> {
    raw.iter().map(classify_table).collect()
}
