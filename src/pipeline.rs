use crate::cluster::{HttpCluster, IndexSelection, SearchCluster};
use crate::config::ExportOptions;
use crate::date::LogTimestamp;
use crate::error::{ExportError, Result};
use crate::indices::{filter_existing, resolve_indices};
use crate::progress::make_count_progress;
use crate::query::build_query;
use crate::sanitize::sanitize_message;
use crate::scroll::ScrollSession;
use crate::util::init_tracing_once;
use crate::writer::BufferedWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// One export run: builder over `ExportOptions` plus an optional external
/// cancellation flag.
#[derive(Clone)]
pub struct LogExport {
    opts: ExportOptions,
    cancel: Option<Arc<AtomicBool>>,
}

/// What an export run produced. `count` is the number of documents actually
/// enumerated; `total` is the cluster's declared match count from the first
/// page, which the controller reports but does not enforce.
#[derive(Clone, Debug)]
pub struct ExportOutcome {
    pub count: u64,
    pub total: u64,
    pub finished: bool,
    pub out_path: Option<PathBuf>,
}

impl LogExport {
    pub fn new() -> Self {
        Self { opts: ExportOptions::default(), cancel: None }
    }

    // -------- Builder methods --------
    pub fn host(mut self, host: impl AsRef<str>, port: u16) -> Self { self.opts = self.opts.with_host(host, port); self }
    pub fn prefixes<I, S>(mut self, prefixes: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> { self.opts = self.opts.with_prefixes(prefixes); self }
    pub fn query(mut self, q: impl Into<String>) -> Self { self.opts = self.opts.with_query(q); self }
    pub fn tag(mut self, t: impl Into<String>) -> Self { self.opts = self.opts.with_tag(t); self }
    pub fn time_range(mut self, start: Option<impl Into<String>>, end: Option<impl Into<String>>) -> Self { self.opts = self.opts.with_time_range(start, end); self }
    pub fn page_size(mut self, n: usize) -> Self { self.opts = self.opts.with_page_size(n); self }
    pub fn scroll_ttl(mut self, ttl: Duration) -> Self { self.opts = self.opts.with_scroll_ttl(ttl); self }
    pub fn out_path(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_out_path(path); self }
    pub fn flush_every(mut self, n: usize) -> Self { self.opts = self.opts.with_flush_every(n); self }
    pub fn verbose(mut self, yes: bool) -> Self { self.opts = self.opts.with_verbose(yes); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }

    /// External cancellation: when the flag flips true the drain loop stops
    /// after the current page, runs cursor cleanup, and reports a partial,
    /// unfinished outcome, exactly like the error path.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Run against the configured cluster endpoint over HTTP.
    pub fn run(self) -> Result<ExportOutcome> {
        let cluster = HttpCluster::new(self.opts.base_url());
        self.run_with(&cluster)
    }

    /// Run against any `SearchCluster` implementation.
    pub fn run_with<C: SearchCluster>(self, cluster: &C) -> Result<ExportOutcome> {
        init_tracing_once(self.opts.verbose);

        // Validation happens before any network activity.
        let range = match (self.opts.start.as_deref(), self.opts.end.as_deref()) {
            (None, None) => None,
            (Some(s), Some(e)) => Some((LogTimestamp::parse(s)?, LogTimestamp::parse(e)?)),
            _ => {
                return Err(ExportError::Validation(
                    "start and end timestamps must be supplied together".to_string(),
                ))
            }
        };
        if range.is_some() && self.opts.prefixes.is_empty() {
            return Err(ExportError::Validation(
                "a date range needs at least one index prefix".to_string(),
            ));
        }

        let mut writer = match &self.opts.out_path {
            Some(p) => Some(BufferedWriter::create(p, self.opts.flush_every)?),
            None => None,
        };

        // No range means the sentinel "search every partition", never a
        // literal index list.
        let selection = match &range {
            None => IndexSelection::All,
            Some((start, end)) => {
                let candidates = resolve_indices(start, end, &self.opts.prefixes);
                let kept = filter_existing(cluster, candidates)?;
                if kept.is_empty() {
                    tracing::warn!("no matching partitions exist for the requested range");
                    let out_path = writer.map(BufferedWriter::finish).transpose()?;
                    return Ok(ExportOutcome { count: 0, total: 0, finished: true, out_path });
                }
                IndexSelection::Dated(kept)
            }
        };

        let query = build_query(
            self.opts.query.as_deref(),
            self.opts.tag.as_deref(),
            range.as_ref().map(|(s, e)| (s, e)),
        );
        tracing::info!(indices = %selection.as_path(), query = %query, "export scope resolved");

        let (mut session, first_page, total) = ScrollSession::open(
            cluster,
            &selection,
            &query,
            self.opts.page_size,
            self.opts.scroll_ttl,
        )?;

        let pb = if self.opts.progress {
            Some(make_count_progress(total, "Exporting"))
        } else {
            None
        };

        let mut count = 0u64;
        let mut finished = true;
        let mut fatal: Option<ExportError> = None;
        let mut page = first_page;

        'drain: loop {
            if page.is_empty() {
                break;
            }
            for doc in &page.docs {
                // Missing message field is treated as an empty string.
                let msg = doc["_source"]["message"].as_str().unwrap_or("");
                let line = sanitize_message(msg);
                count += 1;
                if let Some(w) = writer.as_mut() {
                    if let Err(e) = w.push(line) {
                        fatal = Some(e);
                        break 'drain;
                    }
                }
            }
            if let Some(pb) = &pb {
                pb.inc(page.len() as u64);
            }
            if self.cancel.as_ref().is_some_and(|c| c.load(Ordering::Relaxed)) {
                tracing::warn!(count, "export cancelled, stopping after current page");
                finished = false;
                break;
            }
            match session.next_page() {
                Ok(next) => page = next,
                Err(ExportError::ScrollExpired) => {
                    tracing::warn!(count, "scroll cursor expired, surfacing partial results");
                    finished = false;
                    break;
                }
                Err(e) => {
                    fatal = Some(e);
                    break;
                }
            }
        }

        // Cursor cleanup runs on every exit path before anything else.
        session.close();

        if let Some(e) = fatal {
            return Err(e);
        }

        let out_path = writer.map(BufferedWriter::finish).transpose()?;
        if let Some(pb) = pb {
            pb.finish_with_message(if finished { "done" } else { "partial" });
        }
        tracing::info!(count, total, finished, "export complete");
        Ok(ExportOutcome { count, total, finished, out_path })
    }
}

impl Default for LogExport {
    fn default() -> Self {
        Self::new()
    }
}
