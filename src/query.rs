//! Assembly of the cluster-side query string.

use crate::date::LogTimestamp;

/// AND-join of up to three optional clauses: the user query, the tag filter,
/// and a generated `@timestamp` range. All clauses pass through verbatim to
/// the cluster's query parser; with nothing to say we match everything.
pub fn build_query(
    user_query: Option<&str>,
    tag: Option<&str>,
    range: Option<(&LogTimestamp, &LogTimestamp)>,
) -> String {
    let mut clauses: Vec<String> = Vec::new();
    if let Some(q) = user_query {
        if !q.trim().is_empty() {
            clauses.push(q.trim().to_string());
        }
    }
    if let Some(t) = tag {
        if !t.trim().is_empty() {
            clauses.push(t.trim().to_string());
        }
    }
    if let Some((start, end)) = range {
        clauses.push(format!("@timestamp:[{start} TO {end}]"));
    }
    if clauses.is_empty() {
        "*".to_string()
    } else {
        clauses.join(" AND ")
    }
}
