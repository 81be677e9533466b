/// Classified column type, role flags, and display units.
pub mod column;
/// Ordered unit and role rule tables evaluated against a normalized column.
pub mod rules;
/// Table-level classification entry points.
pub mod table_classifier;

pub use column::{Column, ColumnRoles, Unit};
pub use table_classifier::{classify_column, classify_schema, classify_table, Table};
