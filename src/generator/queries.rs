//! Templated query text. Identifiers are interpolated verbatim; nothing is escaped or validated.

/// Start-of-range placeholder resolved by Grafana (epoch milliseconds).
pub const RANGE_FROM: &str = "$__from";
/// End-of-range placeholder resolved by Grafana (epoch milliseconds).
pub const RANGE_TO: &str = "$__to";
/// Bucket width for generic metric trends.
pub const HOURLY_BUCKET_SECONDS: u32 = 3600;
/// Bucket width for day-granularity trends.
pub const DAILY_BUCKET_SECONDS: u32 = 86400;
/// Row limit for recent-activity listings.
pub const RECENT_ROWS_LIMIT: u32 = 10;

/// Aggregate computed per time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate<'a> {
    /// `SUM(<column>)`.
    Sum(&'a str),
    /// `count(*)`.
    Count,
}

impl Aggregate<'_> {
    fn sql(&self) -> String {
        match self {
            Aggregate::Sum(column) => format!("SUM({column})"),
            Aggregate::Count => "count(*)".to_string(),
        }
    }
}

fn time_window(time_col: &str) -> String {
    format!("unixepoch({time_col}) BETWEEN {RANGE_FROM}/1000 AND {RANGE_TO}/1000")
}

fn where_clause(filter: Option<&str>, condition: Option<String>) -> String {
    let conditions: Vec<String> = filter
        .map(str::to_string)
        .into_iter()
        .chain(condition)
        .collect();
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

/// Time-bucketed aggregate over the dashboard time range.
pub fn bucketed_trend(
    table: &str,
    time_col: &str,
    aggregate: Aggregate<'_>,
    bucket_seconds: u32,
    filter: Option<&str>,
) -> String {
    format!(
        "SELECT (unixepoch({time_col})/{bucket_seconds})*{bucket_seconds} AS time, {} AS value FROM {table}{} GROUP BY 1 ORDER BY 1",
        aggregate.sql(),
        where_clause(filter, Some(time_window(time_col))),
    )
}

/// Sum of a metric over the dashboard time range.
pub fn stat_sum(table: &str, metric_col: &str, time_col: &str) -> String {
    format!(
        "SELECT SUM({metric_col}) AS value FROM {table} WHERE {}",
        time_window(time_col)
    )
}

/// Total row count.
pub fn stat_count(table: &str) -> String {
    format!("SELECT count(*) AS value FROM {table}")
}

/// Row count per distinct value, largest group first.
pub fn distribution(table: &str, column: &str, filter: Option<&str>) -> String {
    format!(
        "SELECT {column}, count(*) AS value FROM {table}{} GROUP BY 1 ORDER BY 2 DESC",
        where_clause(filter, None)
    )
}

/// Most recent rows by a time column.
pub fn recent_rows(table: &str, columns: &[&str], time_col: &str) -> String {
    format!(
        "SELECT {} FROM {table} ORDER BY {time_col} DESC LIMIT {RECENT_ROWS_LIMIT}",
        columns.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_sum_trend_matches_template() {
        assert_eq!(
            bucketed_trend(
                "OnlineTransactions",
                "created_at",
                Aggregate::Sum("amount_myr"),
                HOURLY_BUCKET_SECONDS,
                None,
            ),
            "SELECT (unixepoch(created_at)/3600)*3600 AS time, SUM(amount_myr) AS value \
             FROM OnlineTransactions \
             WHERE unixepoch(created_at) BETWEEN $__from/1000 AND $__to/1000 \
             GROUP BY 1 ORDER BY 1"
        );
    }

    #[test]
    fn filtered_daily_count_puts_filter_before_time_window() {
        assert_eq!(
            bucketed_trend(
                "ContentItemIndex",
                "PublishedUtc",
                Aggregate::Count,
                DAILY_BUCKET_SECONDS,
                Some("Published = 1"),
            ),
            "SELECT (unixepoch(PublishedUtc)/86400)*86400 AS time, count(*) AS value \
             FROM ContentItemIndex \
             WHERE Published = 1 AND unixepoch(PublishedUtc) BETWEEN $__from/1000 AND $__to/1000 \
             GROUP BY 1 ORDER BY 1"
        );
    }

    #[test]
    fn stat_templates() {
        assert_eq!(
            stat_sum("orders", "amount_myr", "created_at"),
            "SELECT SUM(amount_myr) AS value FROM orders \
             WHERE unixepoch(created_at) BETWEEN $__from/1000 AND $__to/1000"
        );
        assert_eq!(stat_count("orders"), "SELECT count(*) AS value FROM orders");
    }

    #[test]
    fn distribution_and_recent_rows_templates() {
        assert_eq!(
            distribution("orders", "payment_status", None),
            "SELECT payment_status, count(*) AS value FROM orders GROUP BY 1 ORDER BY 2 DESC"
        );
        assert_eq!(
            distribution("items", "kind", Some("Published = 1")),
            "SELECT kind, count(*) AS value FROM items WHERE Published = 1 GROUP BY 1 ORDER BY 2 DESC"
        );
        assert_eq!(
            recent_rows("items", &["ModifiedUtc", "Author"], "ModifiedUtc"),
            "SELECT ModifiedUtc, Author FROM items ORDER BY ModifiedUtc DESC LIMIT 10"
        );
    }
}
