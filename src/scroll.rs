//! Scroll-cursor session lifecycle: open, page, close.

use crate::cluster::{HitPage, IndexSelection, SearchCluster};
use crate::error::Result;
use std::time::Duration;

/// One cursor-based query against the cluster. The session records every
/// distinct cursor token the server ever hands back, because a renewal does
/// not always invalidate the prior token server-side; `close` releases them
/// all, best-effort, on every exit path.
pub struct ScrollSession<'a, C: SearchCluster> {
    cluster: &'a C,
    ttl: Duration,
    cursors: Vec<String>,
    closed: bool,
}

impl<'a, C: SearchCluster> ScrollSession<'a, C> {
    /// Issue the initial search and return the live session together with
    /// the first page and the cluster's declared total hit count.
    pub fn open(
        cluster: &'a C,
        selection: &IndexSelection,
        query: &str,
        page_size: usize,
        ttl: Duration,
    ) -> Result<(Self, HitPage, u64)> {
        let opened = cluster.search(selection, query, page_size, ttl)?;
        let session = Self {
            cluster,
            ttl,
            cursors: vec![opened.cursor],
            closed: false,
        };
        Ok((session, opened.page, opened.total))
    }

    /// Fetch the next page with the most recently issued token. The renewed
    /// token joins the teardown list whether or not it differs.
    pub fn next_page(&mut self) -> Result<HitPage> {
        let latest = self
            .cursors
            .last()
            .expect("session always holds the cursor it was opened with")
            .clone();
        let scrolled = self.cluster.scroll_next(&latest, self.ttl)?;
        self.remember(scrolled.cursor);
        Ok(scrolled.page)
    }

    fn remember(&mut self, cursor: String) {
        if !self.cursors.contains(&cursor) {
            self.cursors.push(cursor);
        }
    }

    /// Distinct cursor tokens seen so far, in order of first appearance.
    pub fn cursors(&self) -> &[String] {
        &self.cursors
    }

    /// Best-effort deletion of every token seen in this session. Idempotent;
    /// failures are logged and never raised, so cleanup can never block or
    /// fail the export.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        for cursor in &self.cursors {
            if let Err(e) = self.cluster.delete_scroll(cursor) {
                tracing::warn!(error = %e, "scroll cursor deletion failed (ignored)");
            }
        }
    }
}
