use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced at the edges of the pipeline (parsing input, writing output).
///
/// Classification and compilation are total and never produce one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// The DDL text could not be parsed.
    #[error("SQL parse error: {0}")]
    Parse(#[from] sqlparser::parser::ParserError),

    /// The DDL parsed but contained no `CREATE TABLE` statement.
    #[error("no valid CREATE TABLE statement found")]
    NoTables,

    /// Reading or writing a file failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted (e.g. `"write"`).
        action: &'static str,
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The dashboard document could not be serialized.
    #[error("failed to serialize dashboard: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested output name is not a plain file stem.
    #[error("invalid output name '{name}': {reason}")]
    InvalidOutputName {
        /// Rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
