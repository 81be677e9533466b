/// Quote pairs recognised around a single identifier: ANSI, T-SQL/SQLite, and MySQL styles.
const QUOTE_PAIRS: [(char, char); 3] = [('"', '"'), ('[', ']'), ('`', '`')];

/// Return the identifier without surrounding `"..."`, `[...]`, or `` `...` `` quoting.
pub fn unquote_identifier(ident: &str) -> &str {
    let trimmed = ident.trim();
    QUOTE_PAIRS
        .iter()
        .find_map(|(open, close)| {
            trimmed
                .strip_prefix(*open)
                .and_then(|s| s.strip_suffix(*close))
        })
        .unwrap_or(trimmed)
}

/// Normalize an identifier for case-insensitive matching.
///
/// Trims whitespace, removes surrounding quoting on a single identifier,
/// and lowercases the result.
pub fn normalize_identifier(ident: &str) -> String {
    unquote_identifier(ident).to_lowercase()
}

/// Split a potentially schema-qualified name into `(schema, relation)`.
///
/// Dots inside quoted or bracketed identifiers do not split, e.g. `[my.schema].[table.name]`.
pub fn split_schema_and_relation(name: &str) -> Option<(String, String)> {
    let mut closing: Option<char> = None;
    let mut start = 0usize;
    let mut parts: Vec<&str> = Vec::new();

    for (idx, ch) in name.char_indices() {
        match closing {
            Some(close) if ch == close => closing = None,
            Some(_) => {}
            None => {
                if let Some((_, close)) = QUOTE_PAIRS.iter().find(|(open, _)| *open == ch) {
                    closing = Some(*close);
                } else if ch == '.' {
                    parts.push(name[start..idx].trim());
                    start = idx + 1;
                }
            }
        }
    }
    parts.push(name[start..].trim());

    if parts.len() < 2 {
        return None;
    }

    let schema = unquote_identifier(parts[parts.len() - 2]).to_string();
    let relation = unquote_identifier(parts[parts.len() - 1]).to_string();
    Some((schema, relation))
}

/// Terminal relation name with quoting stripped, case preserved.
///
/// Examples:
/// - `"[ContentItemIndex]"` -> `"ContentItemIndex"`
/// - `"dbo.[UserIndex]"` -> `"UserIndex"`
/// - `"\"Orders\""` -> `"Orders"`
pub fn bare_table_name(name: &str) -> String {
    if let Some((_, relation)) = split_schema_and_relation(name.trim()) {
        return relation;
    }
    unquote_identifier(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquote_identifier_handles_every_quote_style() {
        assert_eq!(unquote_identifier("[ContentItemIndex]"), "ContentItemIndex");
        assert_eq!(unquote_identifier("\"Orders\""), "Orders");
        assert_eq!(unquote_identifier("`logs`"), "logs");
        assert_eq!(unquote_identifier("  plain  "), "plain");
        assert_eq!(unquote_identifier("[unbalanced"), "[unbalanced");
    }

    #[test]
    fn normalize_identifier_lowercases_after_unquoting() {
        assert_eq!(normalize_identifier("[CreatedAt]"), "createdat");
        assert_eq!(normalize_identifier("Amount_MYR"), "amount_myr");
    }

    #[test]
    fn split_schema_and_relation_ignores_dots_inside_quotes() {
        assert_eq!(
            split_schema_and_relation("[my.schema].[table.name]"),
            Some(("my.schema".to_string(), "table.name".to_string()))
        );
        assert_eq!(
            split_schema_and_relation(r#""app"."docs""#),
            Some(("app".to_string(), "docs".to_string()))
        );
        assert_eq!(split_schema_and_relation("docs"), None);
    }

    #[test]
    fn bare_table_name_strips_schema_and_brackets_but_keeps_case() {
        assert_eq!(bare_table_name("[ContentItemIndex]"), "ContentItemIndex");
        assert_eq!(bare_table_name("dbo.[UserIndex]"), "UserIndex");
        assert_eq!(bare_table_name("main.Orders"), "Orders");
        assert_eq!(bare_table_name("SystemLogs"), "SystemLogs");
    }
}
