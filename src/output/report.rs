use std::fmt::{self, Write};

use crate::classifier::Table;
use crate::generator::Dashboard;

/// Build a markdown report of detected columns and generated panels.
///
/// Only tables with a metric or time column are listed, and only those columns.
pub fn build_report(dashboard: Option<&Dashboard>, tables: &[Table]) -> String {
    let mut report = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut report, dashboard, tables);
    report
}

fn write_report(out: &mut String, dashboard: Option<&Dashboard>, tables: &[Table]) -> fmt::Result {
    writeln!(out, "# ddl2grafana Dashboard Report")?;
    writeln!(out)?;
    writeln!(out, "## Detected Columns")?;

    for table in tables.iter().filter(|t| t.is_relevant()) {
        writeln!(out)?;
        writeln!(out, "### {}", table.name())?;
        writeln!(out)?;
        writeln!(out, "| Column | Type | Roles | Unit |")?;
        writeln!(out, "|--------|------|-------|------|")?;
        for column in table
            .columns()
            .iter()
            .filter(|c| c.is_metric() || c.is_time_column())
        {
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                column.name(),
                column.declared_type(),
                column.roles().names().join(", "),
                column.unit()
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "## Panels")?;
    writeln!(out)?;

    let Some(dashboard) = dashboard else {
        writeln!(out, "No panels were generated.")?;
        return Ok(());
    };

    writeln!(out, "| Id | Kind | Position | Unit | Title |")?;
    writeln!(out, "|----|------|----------|------|-------|")?;
    for panel in &dashboard.panels {
        writeln!(
            out,
            "| {} | {} | ({}, {}) | {} | {} |",
            panel.id, panel.kind, panel.grid_pos.x, panel.grid_pos.y, panel.unit, panel.title
        )?;
    }
    Ok(())
}
