//! Ordered rule tables driving column classification.
//!
//! Unit rules are first-match-wins. Role rules are grouped per role and a role holds
//! when any of its rules matches; roles never influence one another.

use super::column::{ColumnRoles, Unit};

/// A column reduced to the lower-cased name and normalized type the rules match against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Lower-cased column name.
    pub name: String,
    /// Lower-cased type token with any leaked `DEFAULT ...` clause removed.
    pub data_type: String,
}

impl ColumnDescriptor {
    /// Normalize a raw `(name, type)` pair.
    pub fn new(name: &str, raw_type: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            data_type: normalize_type(raw_type),
        }
    }

    fn name_contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.name.contains(k))
    }

    fn type_contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.data_type.contains(k))
    }
}

/// Lower-case a raw type token and cut off a `default ...` fragment leaked by the DDL parser.
pub fn normalize_type(raw_type: &str) -> String {
    let lower = raw_type.to_lowercase();
    match lower.find("default") {
        Some(idx) => lower[..idx].trim().to_string(),
        None => lower.trim().to_string(),
    }
}

/// One name-based unit clue.
pub struct UnitRule {
    /// Short label used in diagnostics.
    pub label: &'static str,
    /// Name substrings that trigger the rule.
    pub keywords: &'static [&'static str],
    /// Unit chosen when the rule fires.
    pub unit: fn(&ColumnDescriptor) -> Unit,
}

fn duration_unit(column: &ColumnDescriptor) -> Unit {
    if column.name_contains_any(&["ms", "milli"]) {
        Unit::Milliseconds
    } else {
        Unit::Seconds
    }
}

fn currency_unit(_: &ColumnDescriptor) -> Unit {
    Unit::Currency
}

fn percent_unit(_: &ColumnDescriptor) -> Unit {
    Unit::Percent
}

/// Unit clues in priority order.
pub const UNIT_RULES: &[UnitRule] = &[
    UnitRule {
        label: "duration",
        keywords: &["latency", "duration", "delay"],
        unit: duration_unit,
    },
    UnitRule {
        label: "currency",
        keywords: &["amount", "price", "revenue", "cost"],
        unit: currency_unit,
    },
    UnitRule {
        label: "percent",
        keywords: &["percent", "pct"],
        unit: percent_unit,
    },
];

/// The role a [`RoleRule`] votes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Time axis.
    Time,
    /// Measurable quantity.
    Metric,
    /// Identifier or text label.
    Label,
    /// Grouping dimension.
    Categorical,
}

/// One signal for a role.
pub struct RoleRule {
    /// Role this rule votes for.
    pub role: Role,
    /// Human-readable description of the signal.
    pub reason: &'static str,
    /// Predicate over the normalized column.
    pub matches: fn(&ColumnDescriptor) -> bool,
}

const TIME_TYPE_TOKENS: &[&str] = &["date", "time", "timestamp", "datetime"];
const NUMERIC_TYPE_TOKENS: &[&str] = &["int", "decimal", "float"];
const TEXT_TYPE_TOKENS: &[&str] = &["varchar", "text"];
const IDENTIFIER_MARKER: &str = "id";

/// Name substrings marking a low-cardinality grouping column.
pub const CATEGORICAL_KEYWORDS: &[&str] = &[
    "status", "state", "type", "category", "level", "priority", "severity", "version", "source",
    "target", "method", "mode",
];

/// Role signals. Order inside a role only matters for [`explain`].
pub const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        role: Role::Time,
        reason: "name mentions time or date",
        matches: |c| c.name_contains_any(&["time", "date"]),
    },
    RoleRule {
        role: Role::Time,
        reason: "name is `at`",
        matches: |c| c.name == "at",
    },
    RoleRule {
        role: Role::Time,
        reason: "name contains `_at`",
        matches: |c| c.name.contains("_at"),
    },
    RoleRule {
        role: Role::Time,
        reason: "name ends with `at`",
        matches: |c| c.name.ends_with("at"),
    },
    RoleRule {
        role: Role::Time,
        reason: "temporal type",
        matches: |c| c.type_contains_any(TIME_TYPE_TOKENS),
    },
    RoleRule {
        role: Role::Metric,
        reason: "numeric type, not an identifier",
        matches: |c| {
            c.type_contains_any(NUMERIC_TYPE_TOKENS) && !c.name.contains(IDENTIFIER_MARKER)
        },
    },
    RoleRule {
        role: Role::Label,
        reason: "text type",
        matches: |c| c.type_contains_any(TEXT_TYPE_TOKENS),
    },
    RoleRule {
        role: Role::Label,
        reason: "name mentions status",
        matches: |c| c.name.contains("status"),
    },
    RoleRule {
        role: Role::Label,
        reason: "name mentions id",
        matches: |c| c.name.contains(IDENTIFIER_MARKER),
    },
    RoleRule {
        role: Role::Categorical,
        reason: "categorical name keyword",
        matches: |c| c.name_contains_any(CATEGORICAL_KEYWORDS),
    },
];

/// First matching unit clue, or `short`.
pub fn infer_unit(column: &ColumnDescriptor) -> Unit {
    UNIT_RULES
        .iter()
        .find(|rule| column.name_contains_any(rule.keywords))
        .map_or(Unit::Short, |rule| (rule.unit)(column))
}

/// Evaluate every role signal.
pub fn evaluate_roles(column: &ColumnDescriptor) -> ColumnRoles {
    ROLE_RULES
        .iter()
        .filter(|rule| (rule.matches)(column))
        .fold(ColumnRoles::default(), |mut roles, rule| {
            match rule.role {
                Role::Time => roles.time = true,
                Role::Metric => roles.metric = true,
                Role::Label => roles.label = true,
                Role::Categorical => roles.categorical = true,
            }
            roles
        })
}

/// Every rule that fires for the column, unit clue first.
pub fn explain(column: &ColumnDescriptor) -> Vec<&'static str> {
    let unit = UNIT_RULES
        .iter()
        .find(|rule| column.name_contains_any(rule.keywords))
        .map(|rule| rule.label);
    unit.into_iter()
        .chain(
            ROLE_RULES
                .iter()
                .filter(|rule| (rule.matches)(column))
                .map(|rule| rule.reason),
        )
        .collect()
}
