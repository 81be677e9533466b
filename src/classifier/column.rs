use std::fmt;

/// Display-formatting hint attached to a column and propagated to its panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Plain number (Grafana `short`).
    #[default]
    Short,
    /// Milliseconds.
    Milliseconds,
    /// Seconds.
    Seconds,
    /// Percentage, 0-100.
    Percent,
    /// Monetary amount.
    Currency,
}

impl Unit {
    /// Grafana unit identifier written into `fieldConfig.defaults.unit`.
    ///
    /// Currency renders as Malaysian ringgit, the only currency the revenue clues target.
    pub fn grafana_id(self) -> &'static str {
        match self {
            Unit::Short => "short",
            Unit::Milliseconds => "ms",
            Unit::Seconds => "s",
            Unit::Percent => "percent",
            Unit::Currency => "currencyMYR",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Short => write!(f, "short"),
            Unit::Milliseconds => write!(f, "ms"),
            Unit::Seconds => write!(f, "s"),
            Unit::Percent => write!(f, "percent"),
            Unit::Currency => write!(f, "currency"),
        }
    }
}

/// Semantic roles of a column. Each flag is evaluated independently; several may hold at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColumnRoles {
    /// Usable as a time axis.
    pub time: bool,
    /// Numeric, measurable quantity (never an identifier).
    pub metric: bool,
    /// Identifier or free-text label.
    pub label: bool,
    /// Low-cardinality dimension suited to grouping.
    pub categorical: bool,
}

impl ColumnRoles {
    /// Names of the roles that hold, in a fixed order.
    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.time, "time"),
            (self.metric, "metric"),
            (self.label, "label"),
            (self.categorical, "categorical"),
        ]
        .into_iter()
        .filter_map(|(held, name)| held.then_some(name))
        .collect()
    }
}

/// A classified schema column. Immutable once produced by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
    declared_type: String,
    roles: ColumnRoles,
    unit: Unit,
}

impl Column {
    pub(crate) fn new(name: String, declared_type: String, roles: ColumnRoles, unit: Unit) -> Self {
        Self {
            name,
            declared_type,
            roles,
            unit,
        }
    }

    /// Column name, schema-given spelling (used verbatim in generated queries).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized (lower-cased, default-clause stripped) type token.
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// All role flags.
    pub fn roles(&self) -> ColumnRoles {
        self.roles
    }

    /// Whether the column can serve as a time axis.
    pub fn is_time_column(&self) -> bool {
        self.roles.time
    }

    /// Whether the column is a measurable quantity.
    pub fn is_metric(&self) -> bool {
        self.roles.metric
    }

    /// Whether the column is an identifier or label.
    pub fn is_label(&self) -> bool {
        self.roles.label
    }

    /// Whether the column is a categorical dimension.
    pub fn is_categorical(&self) -> bool {
        self.roles.categorical
    }

    /// Display unit inferred from the column name.
    pub fn unit(&self) -> Unit {
        self.unit
    }
}
