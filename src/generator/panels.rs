use std::fmt;

use tracing::debug;

use super::layout::{GridCursor, GridPos};
use crate::classifier::Unit;

/// Visualization kind of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// Line chart over time.
    Timeseries,
    /// Single value.
    Stat,
    /// Categorical distribution.
    Piechart,
    /// Tabular listing.
    Table,
}

impl PanelKind {
    /// Grafana panel type identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            PanelKind::Timeseries => "timeseries",
            PanelKind::Stat => "stat",
            PanelKind::Piechart => "piechart",
            PanelKind::Table => "table",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A panel waiting for an id and a grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    /// Panel title.
    pub title: String,
    /// Visualization kind.
    pub kind: PanelKind,
    /// Query text.
    pub query: String,
    /// Display unit.
    pub unit: Unit,
}

impl PanelSpec {
    /// Trend chart.
    pub fn timeseries(title: impl Into<String>, query: String, unit: Unit) -> Self {
        Self::new(title, PanelKind::Timeseries, query, unit)
    }

    /// Single-value panel.
    pub fn stat(title: impl Into<String>, query: String, unit: Unit) -> Self {
        Self::new(title, PanelKind::Stat, query, unit)
    }

    /// Pie chart (unit is always `short`).
    pub fn piechart(title: impl Into<String>, query: String) -> Self {
        Self::new(title, PanelKind::Piechart, query, Unit::Short)
    }

    /// Table listing (unit is always `short`).
    pub fn table(title: impl Into<String>, query: String) -> Self {
        Self::new(title, PanelKind::Table, query, Unit::Short)
    }

    fn new(title: impl Into<String>, kind: PanelKind, query: String, unit: Unit) -> Self {
        Self {
            title: title.into(),
            kind,
            query,
            unit,
        }
    }
}

/// A placed, numbered panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    /// Unique id, assigned in emission order starting at 1.
    pub id: u32,
    /// Panel title.
    pub title: String,
    /// Visualization kind.
    pub kind: PanelKind,
    /// Grid cell.
    pub grid_pos: GridPos,
    /// Query text.
    pub query: String,
    /// Display unit.
    pub unit: Unit,
}

/// Receives panels in emission order, numbering and placing each one as it arrives.
///
/// Stat panels and the rest are kept apart so the final list can put stats first
/// without touching ids or positions.
#[derive(Debug)]
pub struct PanelSink {
    cursor: GridCursor,
    next_id: u32,
    stats: Vec<Panel>,
    visuals: Vec<Panel>,
}

impl PanelSink {
    /// Empty sink with the cursor below the header and ids starting at 1.
    pub fn new() -> Self {
        Self {
            cursor: GridCursor::new(),
            next_id: 1,
            stats: Vec::new(),
            visuals: Vec::new(),
        }
    }

    /// Assign the next id and grid cell to `spec`. Returns the id.
    pub fn emit(&mut self, spec: PanelSpec) -> u32 {
        let (grid_pos, next) = self.cursor.place();
        self.cursor = next;
        let id = self.next_id;
        self.next_id += 1;

        debug!(
            id,
            kind = %spec.kind,
            x = grid_pos.x,
            y = grid_pos.y,
            title = %spec.title,
            "emitted panel"
        );

        let panel = Panel {
            id,
            title: spec.title,
            kind: spec.kind,
            grid_pos,
            query: spec.query,
            unit: spec.unit,
        };
        if panel.kind == PanelKind::Stat {
            self.stats.push(panel);
        } else {
            self.visuals.push(panel);
        }
        id
    }

    /// Number of panels emitted so far.
    pub fn len(&self) -> usize {
        self.stats.len() + self.visuals.len()
    }

    /// True when nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of non-stat panels emitted so far.
    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    /// All panels, stats first, each group in emission order.
    pub fn into_panels(self) -> Vec<Panel> {
        let mut panels = self.stats;
        panels.extend(self.visuals);
        panels
    }
}

impl Default for PanelSink {
    fn default() -> Self {
        Self::new()
    }
}
