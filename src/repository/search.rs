//! Full-text search over the `customers_fts` index.
//!
//! Caller input never reaches the FTS5 query parser verbatim: it is split
//! into word tokens, each token is quoted so it must match a whole indexed
//! word, and the tokens are combined with an implicit AND.

use crate::repository::{SortField, SortOrder};

/// Subquery selecting the ids of customers matching the bound FTS expression.
const MATCH_FILTER: &str =
    "id IN (SELECT customer_id FROM customers_fts WHERE customers_fts MATCH ?)";

/// Builds a safe FTS5 match expression from free-form input.
///
/// Returns `None` when the input contains no searchable tokens.
pub fn match_expression(input: &str) -> Option<String> {
    let terms = input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| format!("\"{token}\""))
        .collect::<Vec<_>>();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

/// SQL counting customers matching the bound match expression.
pub fn count_sql() -> String {
    format!("SELECT COUNT(*) AS count FROM customers WHERE {MATCH_FILTER}")
}

/// SQL loading one ordered page of matching customers.
///
/// Binds, in order: match expression, limit, offset. The interpolated
/// column and direction come from closed enums.
pub fn page_sql(sort_by: SortField, order: SortOrder) -> String {
    format!(
        "SELECT * FROM customers WHERE {MATCH_FILTER} ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
        sort_by.column(),
        order.as_sql(),
    )
}
