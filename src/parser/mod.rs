/// Identifier and table-name normalization helpers (schema-qualified names, quoted identifiers).
pub mod names;
/// Thin wrapper around `sqlparser` that extracts `CREATE TABLE` name/column/type triples.
pub mod sql_parser;
