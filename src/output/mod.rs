/// Writes the dashboard JSON and report to disk.
pub mod formatter;
/// Builds a Markdown report of detected columns and generated panels.
pub mod report;
