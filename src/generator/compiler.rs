use serde::Serialize;
use tracing::{debug, info};

use super::panels::{Panel, PanelSink, PanelSpec};
use super::queries::{self, Aggregate, HOURLY_BUCKET_SECONDS};
use super::shapes::KNOWN_SHAPES;
use crate::classifier::{Table, Unit};

/// Default dashboard title.
pub const DEFAULT_TITLE: &str = "SilverVector Generated Dashboard";
/// Auto-refresh interval written into every dashboard.
pub const REFRESH_INTERVAL: &str = "10s";
/// Default time range start.
pub const TIME_FROM: &str = "now-30d";
/// Default time range end.
pub const TIME_TO: &str = "now";
/// Metric-name marker for amounts that also get a revenue stat.
pub const REVENUE_MARKER: &str = "myr";

/// Opaque datasource reference copied onto every panel and target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasourceRef {
    /// Datasource plugin type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Datasource uid, usually a `${variable}` reference.
    pub uid: String,
}

impl Default for DatasourceRef {
    fn default() -> Self {
        Self {
            type_name: "frser-sqlite-datasource".to_string(),
            uid: "${datasource}".to_string(),
        }
    }
}

/// Caller-controlled dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Dashboard title.
    pub title: String,
    /// Datasource every panel queries.
    pub datasource: DatasourceRef,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            datasource: DatasourceRef::default(),
        }
    }
}

/// Relative time range shown when the dashboard opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    /// Range start.
    pub from: String,
    /// Range end.
    pub to: String,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            from: TIME_FROM.to_string(),
            to: TIME_TO.to_string(),
        }
    }
}

/// A compiled dashboard: stat panels first, then everything else, each in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// Dashboard title.
    pub title: String,
    /// Ordered panels.
    pub panels: Vec<Panel>,
    /// Default time range.
    pub time_range: TimeRange,
    /// Auto-refresh interval.
    pub refresh_interval: String,
    /// Datasource referenced by every panel.
    pub datasource: DatasourceRef,
}

/// Compile classified tables into a dashboard.
///
/// Returns `None` when no trend, pie, or table panel could be generated: the schema has
/// nothing worth rendering (no time axis with metrics or categories, and no recognized shape).
pub fn compile(tables: &[Table], options: &DashboardOptions) -> Option<Dashboard> {
    let mut sink = PanelSink::new();

    for shape in KNOWN_SHAPES {
        if let Some(matched) = shape.matches(tables) {
            debug!(shape = shape.name, "recognized schema shape");
            shape.emit(&matched, &mut sink);
        }
    }

    for table in tables {
        emit_table_panels(table, &mut sink);
    }

    if sink.visual_count() == 0 {
        info!(
            tables = tables.len(),
            discarded = sink.len(),
            "no panels were generated"
        );
        return None;
    }

    let panels = sink.into_panels();
    info!(tables = tables.len(), panels = panels.len(), "compiled dashboard");

    Some(Dashboard {
        title: options.title.clone(),
        panels,
        time_range: TimeRange::default(),
        refresh_interval: REFRESH_INTERVAL.to_string(),
        datasource: options.datasource.clone(),
    })
}

fn emit_table_panels(table: &Table, sink: &mut PanelSink) {
    let Some(time_col) = table.time_column() else {
        debug!(table = table.name(), "skipping table without a time column");
        return;
    };
    let name = table.name();
    let time = time_col.name();

    for metric in table.metrics() {
        if metric.name().to_lowercase().contains(REVENUE_MARKER) {
            sink.emit(PanelSpec::stat(
                format!("Total Revenue ({})", metric.name()),
                queries::stat_sum(name, metric.name(), time),
                Unit::Currency,
            ));
        }
        sink.emit(PanelSpec::timeseries(
            format!("{name} - {} Trend", metric.name()),
            queries::bucketed_trend(
                name,
                time,
                Aggregate::Sum(metric.name()),
                HOURLY_BUCKET_SECONDS,
                None,
            ),
            metric.unit(),
        ));
    }

    sink.emit(PanelSpec::stat(
        format!("{name} - Total Records"),
        queries::stat_count(name),
        Unit::Short,
    ));

    for column in table.categoricals() {
        sink.emit(PanelSpec::piechart(
            format!("{name} - {} Distribution", column.name()),
            queries::distribution(name, column.name(), None),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_table;
    use crate::generator::panels::PanelKind;
    use crate::parser::sql_parser::RawTable;

    fn orders() -> Table {
        classify_table(&RawTable::new(
            "orders",
            &[
                ("order_id", "int"),
                ("amount_myr", "decimal(10,2)"),
                ("latency_ms", "int"),
                ("payment_status", "varchar(20)"),
                ("created_at", "datetime"),
            ],
        ))
    }

    #[test]
    fn revenue_stat_precedes_its_trend_in_emission_order() {
        let dashboard = compile(&[orders()], &DashboardOptions::default()).expect("panels");
        let by_id = |id: u32| {
            dashboard
                .panels
                .iter()
                .find(|p| p.id == id)
                .expect("contiguous ids")
        };
        assert_eq!(by_id(1).title, "Total Revenue (amount_myr)");
        assert_eq!(by_id(1).unit, Unit::Currency);
        assert_eq!(by_id(2).title, "orders - amount_myr Trend");
        assert_eq!(by_id(2).unit, Unit::Currency);
        assert_eq!(by_id(3).title, "orders - latency_ms Trend");
        assert_eq!(by_id(3).unit, Unit::Milliseconds);
        assert_eq!(by_id(4).title, "orders - Total Records");
        assert_eq!(by_id(5).title, "orders - payment_status Distribution");
    }

    #[test]
    fn revenue_stat_sums_over_the_table_time_axis() {
        let dashboard = compile(&[orders()], &DashboardOptions::default()).expect("panels");
        assert_eq!(
            dashboard.panels[0].query,
            "SELECT SUM(amount_myr) AS value FROM orders \
             WHERE unixepoch(created_at) BETWEEN $__from/1000 AND $__to/1000"
        );
    }

    #[test]
    fn metadata_is_fixed_and_options_pass_through() {
        let options = DashboardOptions {
            title: "Shop".to_string(),
            datasource: DatasourceRef {
                type_name: "grafana-postgresql-datasource".to_string(),
                uid: "pg".to_string(),
            },
        };
        let dashboard = compile(&[orders()], &options).expect("panels");
        assert_eq!(dashboard.title, "Shop");
        assert_eq!(dashboard.refresh_interval, "10s");
        assert_eq!(dashboard.time_range.from, "now-30d");
        assert_eq!(dashboard.time_range.to, "now");
        assert_eq!(dashboard.datasource.uid, "pg");
    }

    #[test]
    fn count_stat_alone_is_nothing_to_render() {
        let table = classify_table(&RawTable::new(
            "audit",
            &[("entry_id", "int"), ("logged_at", "datetime")],
        ));
        assert!(compile(&[table], &DashboardOptions::default()).is_none());
        assert!(compile(&[], &DashboardOptions::default()).is_none());
    }

    #[test]
    fn recognized_shape_still_runs_the_generic_pass() {
        let content = classify_table(&RawTable::new(
            "ContentItemIndex",
            &[
                ("DocumentId", "integer"),
                ("ContentType", "text"),
                ("ModifiedUtc", "datetime"),
            ],
        ));
        let dashboard = compile(&[content], &DashboardOptions::default()).expect("panels");
        let titles: Vec<_> = dashboard.panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "ContentItemIndex - Total Records",
                "Content Velocity (Items/Day)",
                "Content Type Distribution",
                "Recent Content Activity",
                "ContentItemIndex - ContentType Distribution",
            ]
        );
        assert_eq!(dashboard.panels[0].kind, PanelKind::Stat);
        assert_eq!(dashboard.panels[0].id, 4);
    }
}
