use serde::Serialize;

use super::compiler::{Dashboard, DatasourceRef, TimeRange};
use super::layout::GridPos;
use super::panels::{Panel, PanelKind};
use crate::error::Error;

// ── Grafana dashboard JSON structs ────────────────────────────────────

/// Top-level dashboard document in the shape Grafana imports.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardDocument {
    /// Dashboard title.
    pub title: String,
    /// Auto-refresh interval.
    pub refresh: String,
    /// Default time range.
    pub time: TimeRange,
    /// Template variables (the datasource variable every panel references).
    pub templating: Templating,
    /// Panels in display order.
    pub panels: Vec<PanelDocument>,
}

/// Dashboard template variables.
#[derive(Debug, Clone, Serialize)]
pub struct Templating {
    /// Declared variables.
    pub list: Vec<TemplateVariable>,
}

/// A single template variable.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateVariable {
    /// Variable name, referenced as `${name}`.
    pub name: String,
    /// Variable type (`datasource`).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Datasource plugin type the variable selects from.
    pub query: String,
}

/// One panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDocument {
    /// Panel title.
    pub title: String,
    /// Grafana panel type.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Panel id.
    pub id: u32,
    /// Grid cell.
    pub grid_pos: GridPos,
    /// Datasource reference.
    pub datasource: DatasourceRef,
    /// Queries (always exactly one, `refId` `A`).
    pub targets: Vec<Target>,
    /// Field defaults; absent for pie charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_config: Option<FieldConfig>,
    /// Kind-specific display options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<PanelOptions>,
}

/// A panel query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Datasource reference.
    pub datasource: DatasourceRef,
    /// Result format (`table`).
    pub format: &'static str,
    /// Query text.
    pub query_text: String,
    /// Query text before variable interpolation.
    pub raw_query_text: String,
    /// Query text for SQL datasources.
    pub raw_sql: String,
    /// Query reference id.
    pub ref_id: &'static str,
    /// Result columns parsed as timestamps; only for time-aware panels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_columns: Option<Vec<&'static str>>,
}

/// Field configuration wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct FieldConfig {
    /// Defaults applied to every field.
    pub defaults: FieldDefaults,
}

/// Field defaults.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDefaults {
    /// Visualization-specific field settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<FieldCustom>,
    /// Grafana unit id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    /// Color thresholds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>,
}

/// Visualization-specific field settings.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FieldCustom {
    /// Line styling for time series.
    #[serde(rename_all = "camelCase")]
    Line {
        /// Draw style (`line`).
        draw_style: &'static str,
        /// Interpolation (`smooth`).
        line_interpolation: &'static str,
        /// Whether gaps are bridged.
        span_nulls: bool,
    },
    /// Cell styling for tables.
    #[serde(rename_all = "camelCase")]
    Cell {
        /// Text alignment.
        align: &'static str,
        /// Cell display mode.
        display_mode: &'static str,
        /// Whether the cell inspector is enabled.
        inspect: bool,
    },
}

/// Threshold configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Thresholds {
    /// Threshold mode.
    pub mode: &'static str,
    /// Ordered threshold steps.
    pub steps: Vec<ThresholdStep>,
}

/// A threshold step; the base step has a `null` value.
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdStep {
    /// Step color.
    pub color: &'static str,
    /// Lower bound.
    pub value: Option<f64>,
}

/// Kind-specific display options.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PanelOptions {
    /// Stat options.
    #[serde(rename_all = "camelCase")]
    Stat {
        /// Sparkline mode.
        graph_mode: &'static str,
        /// Color mode.
        color_mode: &'static str,
        /// Value alignment.
        justify_mode: &'static str,
    },
    /// Pie chart options.
    #[serde(rename_all = "camelCase")]
    Pie {
        /// Legend settings.
        legend: Legend,
        /// Pie style.
        pie_type: &'static str,
        /// Value reduction.
        reduce_options: ReduceOptions,
    },
}

/// Pie chart legend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Legend layout.
    pub display_mode: &'static str,
    /// Legend placement.
    pub placement: &'static str,
}

/// Pie chart value reduction.
#[derive(Debug, Clone, Serialize)]
pub struct ReduceOptions {
    /// Show every row rather than a reduced value.
    pub values: bool,
    /// Reducer functions.
    pub calcs: Vec<&'static str>,
    /// Field selector.
    pub fields: &'static str,
}

// ── Conversion ──────────────────────────────────────────────────────

const TIME_COLUMNS: [&str; 2] = ["time", "ts"];

impl PanelDocument {
    /// Render a compiled panel against a datasource.
    pub fn from_panel(panel: &Panel, datasource: &DatasourceRef) -> Self {
        let time_aware = matches!(panel.kind, PanelKind::Timeseries | PanelKind::Stat);
        let target = Target {
            datasource: datasource.clone(),
            format: "table",
            query_text: panel.query.clone(),
            raw_query_text: panel.query.clone(),
            raw_sql: panel.query.clone(),
            ref_id: "A",
            time_columns: time_aware.then(|| TIME_COLUMNS.to_vec()),
        };

        let unit = Some(panel.unit.grafana_id());
        let (field_config, options) = match panel.kind {
            PanelKind::Timeseries => (
                Some(FieldDefaults {
                    custom: Some(FieldCustom::Line {
                        draw_style: "line",
                        line_interpolation: "smooth",
                        span_nulls: false,
                    }),
                    unit,
                    thresholds: None,
                }),
                None,
            ),
            PanelKind::Stat => (
                Some(FieldDefaults {
                    custom: None,
                    unit,
                    thresholds: Some(Thresholds {
                        mode: "absolute",
                        steps: vec![ThresholdStep {
                            color: "green",
                            value: None,
                        }],
                    }),
                }),
                Some(PanelOptions::Stat {
                    graph_mode: "area",
                    color_mode: "background",
                    justify_mode: "center",
                }),
            ),
            PanelKind::Piechart => (
                None,
                Some(PanelOptions::Pie {
                    legend: Legend {
                        display_mode: "list",
                        placement: "right",
                    },
                    pie_type: "donut",
                    reduce_options: ReduceOptions {
                        values: true,
                        calcs: vec!["lastNotNull"],
                        fields: "",
                    },
                }),
            ),
            PanelKind::Table => (
                Some(FieldDefaults {
                    custom: Some(FieldCustom::Cell {
                        align: "auto",
                        display_mode: "auto",
                        inspect: false,
                    }),
                    unit: None,
                    thresholds: None,
                }),
                None,
            ),
        };

        Self {
            title: panel.title.clone(),
            kind: panel.kind.as_str(),
            id: panel.id,
            grid_pos: panel.grid_pos,
            datasource: datasource.clone(),
            targets: vec![target],
            field_config: field_config.map(|defaults| FieldConfig { defaults }),
            options,
        }
    }
}

impl Dashboard {
    /// Render the JSON document model.
    pub fn to_document(&self) -> DashboardDocument {
        DashboardDocument {
            title: self.title.clone(),
            refresh: self.refresh_interval.clone(),
            time: self.time_range.clone(),
            templating: Templating {
                list: vec![TemplateVariable {
                    name: "datasource".to_string(),
                    type_name: "datasource".to_string(),
                    query: self.datasource.type_name.clone(),
                }],
            },
            panels: self
                .panels
                .iter()
                .map(|panel| PanelDocument::from_panel(panel, &self.datasource))
                .collect(),
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }
}
