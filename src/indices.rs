//! Resolution of daily index-partition names from a validated date range.

use crate::cluster::SearchCluster;
use crate::date::{iter_days, LogTimestamp};
use crate::error::Result;

/// Cross-join of every calendar day in `[start, end]` (inclusive, date
/// component only) with the configured prefixes, as `{prefix}{yyyy.mm.dd}`.
/// A same-day range yields exactly one name per prefix.
pub fn resolve_indices(start: &LogTimestamp, end: &LogTimestamp, prefixes: &[String]) -> Vec<String> {
    let mut names = Vec::new();
    for day in iter_days(start.day(), end.day()) {
        let stamp = format!("{:04}.{:02}.{:02}", day.year(), u8::from(day.month()), day.day());
        for prefix in prefixes {
            names.push(format!("{prefix}{stamp}"));
        }
    }
    names
}

/// Drop candidate partitions the cluster does not know about. Querying a
/// missing index is a request-level error on the wire, so absent days are
/// filtered out here rather than surfaced to the user.
pub fn filter_existing<C: SearchCluster>(cluster: &C, candidates: Vec<String>) -> Result<Vec<String>> {
    let mut kept = Vec::with_capacity(candidates.len());
    for name in candidates {
        if cluster.index_exists(&name)? {
            kept.push(name);
        } else {
            tracing::debug!(index = %name, "partition absent, dropped from selection");
        }
    }
    Ok(kept)
}
