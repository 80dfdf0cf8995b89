use std::path::{Path, PathBuf};
use std::time::Duration;

/// User-facing options with sensible defaults and builder chaining.
///
/// Every process-wide toggle of the export (debug logging, flush batch size,
/// progress display) lives here; there is no global mutable state.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub host: String,                  // cluster hostname, no scheme
    pub port: u16,
    pub prefixes: Vec<String>,         // index-name prefixes, e.g. "logstash-"
    pub query: Option<String>,         // free-text query, passed through verbatim
    pub tag: Option<String>,           // tag filter clause, passed through verbatim
    pub start: Option<String>,         // inclusive, YYYY-MM-DDTHH:MM:SS.mmmZ
    pub end: Option<String>,           // inclusive, YYYY-MM-DDTHH:MM:SS.mmmZ
    pub page_size: usize,              // hits per scroll page
    pub scroll_ttl: Duration,          // cluster-side cursor time-to-live
    pub out_path: Option<PathBuf>,     // if None, count only, no file written
    pub flush_every: usize,            // buffered lines per sink append
    pub verbose: bool,                 // debug-level logging
    pub progress: bool,                // show progress bar
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9200,
            prefixes: vec!["logstash-".to_string()],
            query: None,
            tag: None,
            start: None,
            end: None,
            page_size: 100,
            scroll_ttl: Duration::from_secs(30 * 60),
            out_path: None,
            flush_every: 1000,
            verbose: false,
            progress: true,
        }
    }
}

impl ExportOptions {
    pub fn with_host(mut self, host: impl AsRef<str>, port: u16) -> Self {
        self.host = host.as_ref().trim().to_string();
        self.port = port;
        self
    }
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.query = Some(q.into());
        self
    }
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
    pub fn with_time_range(
        mut self,
        start: Option<impl Into<String>>,
        end: Option<impl Into<String>>,
    ) -> Self {
        self.start = start.map(Into::into);
        self.end = end.map(Into::into);
        self
    }
    pub fn with_page_size(mut self, n: usize) -> Self {
        self.page_size = n.max(1);
        self
    }
    pub fn with_scroll_ttl(mut self, ttl: Duration) -> Self {
        self.scroll_ttl = ttl;
        self
    }
    pub fn with_out_path(mut self, path: impl AsRef<Path>) -> Self {
        self.out_path = Some(path.as_ref().to_path_buf());
        self
    }
    pub fn with_flush_every(mut self, n: usize) -> Self {
        self.flush_every = n.max(1);
        self
    }
    pub fn with_verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }

    /// Base URL of the cluster's HTTP endpoint.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
