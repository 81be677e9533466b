use std::path::{Component, Path};

use tracing::info;

use crate::classifier::Table;
use crate::error::Error;
use crate::generator::Dashboard;
use crate::output::report;

/// Write `<name>.json` and `<name>_report.md` to the specified directory.
pub fn write_output(
    output_dir: &Path,
    name: &str,
    dashboard: &Dashboard,
    tables: &[Table],
) -> Result<(), Error> {
    validate_output_name(name)?;

    std::fs::create_dir_all(output_dir).map_err(|source| Error::Io {
        action: "create output directory",
        path: output_dir.to_path_buf(),
        source,
    })?;

    let json_path = output_dir.join(format!("{name}.json"));
    write_file(&json_path, &dashboard.to_json_pretty()?)?;

    let report_path = output_dir.join(format!("{name}_report.md"));
    write_file(&report_path, &report::build_report(Some(dashboard), tables))?;

    info!(
        dashboard = %json_path.display(),
        report = %report_path.display(),
        "wrote output"
    );
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    std::fs::write(path, contents).map_err(|source| Error::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}

fn validate_output_name(name: &str) -> Result<(), Error> {
    let invalid = |reason| Error::InvalidOutputName {
        name: name.to_string(),
        reason,
    };
    if name.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    let candidate = Path::new(name);
    if candidate.is_absolute() {
        return Err(invalid("absolute paths are not allowed"));
    }
    if candidate.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    }) {
        return Err(invalid("traversal segments are not allowed"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("path separators are not allowed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_table;
    use crate::generator::{compile, DashboardOptions};
    use crate::parser::sql_parser::RawTable;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_path(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!("{prefix}_{nanos}"))
    }

    fn sample() -> (Dashboard, Vec<Table>) {
        let tables = vec![classify_table(&RawTable::new(
            "orders",
            &[("amount_myr", "decimal(10,2)"), ("created_at", "datetime")],
        ))];
        let dashboard = compile(&tables, &DashboardOptions::default()).expect("panels");
        (dashboard, tables)
    }

    #[test]
    fn write_output_reports_directory_creation_errors() {
        let path = unique_path("ddl2grafana_formatter_file");
        std::fs::write(&path, "not a directory").expect("should create marker file");
        let (dashboard, tables) = sample();

        let err = write_output(&path, "output", &dashboard, &tables)
            .expect_err("directory creation should fail");
        assert!(err.to_string().contains("failed to create output directory"));
    }

    #[test]
    fn write_output_rejects_unsafe_name_paths() {
        let dir = unique_path("ddl2grafana_formatter_dir");
        let (dashboard, tables) = sample();

        for name in ["nested/output", "../escape", "", "/abs"] {
            let err = write_output(&dir, name, &dashboard, &tables)
                .expect_err("unsafe output name should fail validation");
            assert!(
                matches!(err, Error::InvalidOutputName { .. }),
                "unexpected error for {name:?}: {err}"
            );
        }
    }

    #[test]
    fn write_output_writes_all_artifacts_on_success() {
        let dir = unique_path("ddl2grafana_formatter_ok");
        let (dashboard, tables) = sample();

        write_output(&dir, "shop", &dashboard, &tables).expect("write_output should succeed");

        let json = std::fs::read_to_string(dir.join("shop.json")).expect("json file should exist");
        let report =
            std::fs::read_to_string(dir.join("shop_report.md")).expect("report should exist");

        let doc: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(doc["panels"].as_array().map(Vec::len), Some(3));
        assert!(report.contains("### orders"));
    }
}
