//! Recognized schema shapes that get a bespoke panel bundle ahead of the generic panels.

use super::panels::{PanelSink, PanelSpec};
use super::queries::{self, Aggregate, DAILY_BUCKET_SECONDS};
use crate::classifier::{Table, Unit};
use crate::parser::names::bare_table_name;

/// A schema signature and the panels it contributes.
pub struct SchemaShape {
    /// Display name of the recognized product/schema.
    pub name: &'static str,
    /// Table whose presence triggers the shape (bracket-stripped, exact match).
    pub anchor_table: &'static str,
    build: fn(&ShapeMatch<'_>, &mut PanelSink),
}

impl SchemaShape {
    /// Try to match the shape against a table set.
    pub fn matches<'a>(&self, tables: &'a [Table]) -> Option<ShapeMatch<'a>> {
        find_table(tables, self.anchor_table).map(|anchor| ShapeMatch { tables, anchor })
    }

    /// Emit the shape's panels for a successful match.
    pub fn emit(&self, matched: &ShapeMatch<'_>, sink: &mut PanelSink) {
        (self.build)(matched, sink);
    }
}

/// A successful shape match: the anchor table plus the whole table set for optional lookups.
pub struct ShapeMatch<'a> {
    tables: &'a [Table],
    anchor: &'a Table,
}

impl<'a> ShapeMatch<'a> {
    /// The table that triggered the match.
    pub fn anchor(&self) -> &'a Table {
        self.anchor
    }

    /// Another table of the schema by bare name.
    pub fn table(&self, bare_name: &str) -> Option<&'a Table> {
        find_table(self.tables, bare_name)
    }
}

fn find_table<'a>(tables: &'a [Table], bare_name: &str) -> Option<&'a Table> {
    tables.iter().find(|t| bare_table_name(t.name()) == bare_name)
}

/// Every shape the compiler recognizes, checked in order.
pub const KNOWN_SHAPES: &[SchemaShape] = &[SchemaShape {
    name: "Orchard Core",
    anchor_table: "ContentItemIndex",
    build: orchard_core_panels,
}];

const ORCHARD_PUBLISHED_FILTER: &str = "Published = 1";
const ORCHARD_USER_TABLE: &str = "UserIndex";

fn orchard_core_panels(matched: &ShapeMatch<'_>, sink: &mut PanelSink) {
    let content = matched.anchor().name();

    sink.emit(PanelSpec::timeseries(
        "Content Velocity (Items/Day)",
        queries::bucketed_trend(
            content,
            "PublishedUtc",
            Aggregate::Count,
            DAILY_BUCKET_SECONDS,
            Some(ORCHARD_PUBLISHED_FILTER),
        ),
        Unit::Short,
    ));
    sink.emit(PanelSpec::piechart(
        "Content Type Distribution",
        queries::distribution(content, "ContentType", Some(ORCHARD_PUBLISHED_FILTER)),
    ));
    sink.emit(PanelSpec::table(
        "Recent Content Activity",
        queries::recent_rows(
            content,
            &["ModifiedUtc", "DisplayText", "Author", "ContentType"],
            "ModifiedUtc",
        ),
    ));

    if let Some(users) = matched.table(ORCHARD_USER_TABLE) {
        sink.emit(PanelSpec::stat(
            "Total Users",
            queries::stat_count(users.name()),
            Unit::Short,
        ));
    }
}
