#![allow(dead_code)]

use std::path::PathBuf;

use ddl2grafana::classifier::{classify_schema, Table};
use ddl2grafana::generator::{compile, Dashboard, DashboardOptions, Panel};
use ddl2grafana::parser::sql_parser::{self, Dialect};

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn read_fixture_sql(fixture: &str) -> String {
    let path = fixture_dir(fixture).join("input.sql");
    std::fs::read_to_string(path).expect("fixture SQL should be readable")
}

pub(crate) fn load_fixture_tables(fixture: &str, dialect: Dialect) -> Vec<Table> {
    let raw = sql_parser::parse_schema(&read_fixture_sql(fixture), dialect)
        .expect("fixture SQL should parse");
    classify_schema(&raw)
}

pub(crate) fn compile_fixture(fixture: &str, dialect: Dialect) -> Option<Dashboard> {
    compile(
        &load_fixture_tables(fixture, dialect),
        &DashboardOptions::default(),
    )
}

/// One line per panel: `id kind (x, y) unit title`.
pub(crate) fn panel_summary(panels: &[Panel]) -> String {
    panels
        .iter()
        .map(|p| {
            format!(
                "{} {} ({}, {}) {} {}",
                p.id, p.kind, p.grid_pos.x, p.grid_pos.y, p.unit, p.title
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).expect("should create temp dir");
    dir
}
