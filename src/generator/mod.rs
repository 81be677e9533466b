/// Dashboard compilation from classified tables.
pub mod compiler;
/// Grafana dashboard JSON structs and rendering.
pub mod json_model;
/// Two-column grid packing.
pub mod layout;
/// Panel types and the numbering/placement sink.
pub mod panels;
/// Query text templates.
pub mod queries;
/// Recognized schema shapes with bespoke panel bundles.
pub mod shapes;

pub use compiler::{compile, Dashboard, DashboardOptions, DatasourceRef, TimeRange};
pub use panels::{Panel, PanelKind};
