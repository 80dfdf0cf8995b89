//! The search-cluster seam: a small trait over the four wire operations the
//! export needs, plus the blocking HTTP implementation speaking the
//! Elasticsearch REST API.

use crate::error::{ExportError, Result};
use serde_json::{json, Value};
use std::time::Duration;

/// Field the free-text query is matched against by default.
pub const MATCH_FIELD: &str = "message";

/// Which partitions a search is scoped to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexSelection {
    /// No date range supplied: search every partition.
    All,
    /// Daily partitions resolved from the request's date range.
    Dated(Vec<String>),
}

impl IndexSelection {
    /// Path component for the search URL (`_all` or a comma-joined list).
    pub fn as_path(&self) -> String {
        match self {
            IndexSelection::All => "_all".to_string(),
            IndexSelection::Dated(names) => names.join(","),
        }
    }
}

/// One page of raw documents from the cluster.
#[derive(Clone, Debug, Default)]
pub struct HitPage {
    pub docs: Vec<Value>,
}

impl HitPage {
    /// A zero-length page signals end-of-results.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
    pub fn len(&self) -> usize {
        self.docs.len()
    }
}

/// Result of the initial search: first page, declared total, opened cursor.
#[derive(Clone, Debug)]
pub struct ScrollOpen {
    pub page: HitPage,
    pub total: u64,
    pub cursor: String,
}

/// Result of one scroll continuation: next page plus the renewed cursor.
#[derive(Clone, Debug)]
pub struct ScrollPage {
    pub page: HitPage,
    pub cursor: String,
}

/// Black-box cluster operations consumed by the export. Cursor deletion is a
/// first-class operation here; callers treat its failures as advisory.
pub trait SearchCluster {
    fn index_exists(&self, name: &str) -> Result<bool>;
    fn search(
        &self,
        selection: &IndexSelection,
        query: &str,
        page_size: usize,
        ttl: Duration,
    ) -> Result<ScrollOpen>;
    fn scroll_next(&self, cursor: &str, ttl: Duration) -> Result<ScrollPage>;
    fn delete_scroll(&self, cursor: &str) -> anyhow::Result<()>;
}

/// Blocking HTTP client for an Elasticsearch-compatible cluster.
pub struct HttpCluster {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpCluster {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn parse_hits(body: &Value) -> (HitPage, u64) {
        let docs = body["hits"]["hits"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        // ES 7+ reports `hits.total.value`, older servers a bare number.
        let total = body["hits"]["total"]["value"]
            .as_u64()
            .or_else(|| body["hits"]["total"].as_u64())
            .unwrap_or(0);
        (HitPage { docs }, total)
    }

    fn cursor_of(body: &Value) -> Result<String> {
        body["_scroll_id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ExportError::Query("response carried no _scroll_id".to_string()))
    }
}

fn ttl_str(ttl: Duration) -> String {
    format!("{}s", ttl.as_secs())
}

impl SearchCluster for HttpCluster {
    fn index_exists(&self, name: &str) -> Result<bool> {
        let resp = self
            .client
            .head(format!("{}/{}", self.base_url, name))
            .send()
            .map_err(ExportError::Connection)?;
        Ok(resp.status().is_success())
    }

    fn search(
        &self,
        selection: &IndexSelection,
        query: &str,
        page_size: usize,
        ttl: Duration,
    ) -> Result<ScrollOpen> {
        let url = format!(
            "{}/{}/_search?scroll={}",
            self.base_url,
            selection.as_path(),
            ttl_str(ttl)
        );
        let body = json!({
            "size": page_size,
            "query": {
                "query_string": { "default_field": MATCH_FIELD, "query": query }
            }
        });
        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .map_err(ExportError::Connection)?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(ExportError::Query(format!("{status}: {text}")));
        }
        let body: Value = resp
            .json()
            .map_err(|e| ExportError::Query(format!("unreadable search response: {e}")))?;
        let (page, total) = Self::parse_hits(&body);
        let cursor = Self::cursor_of(&body)?;
        Ok(ScrollOpen { page, total, cursor })
    }

    fn scroll_next(&self, cursor: &str, ttl: Duration) -> Result<ScrollPage> {
        let url = format!("{}/_search/scroll", self.base_url);
        let body = json!({ "scroll": ttl_str(ttl), "scroll_id": cursor });
        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .map_err(ExportError::Connection)?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            // search_context_missing: the cursor idled past its TTL.
            return Err(ExportError::ScrollExpired);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(ExportError::Query(format!("{status}: {text}")));
        }
        let body: Value = resp
            .json()
            .map_err(|e| ExportError::Query(format!("unreadable scroll response: {e}")))?;
        let (page, _) = Self::parse_hits(&body);
        let cursor = Self::cursor_of(&body)?;
        Ok(ScrollPage { page, cursor })
    }

    fn delete_scroll(&self, cursor: &str) -> anyhow::Result<()> {
        let url = format!("{}/_search/scroll", self.base_url);
        let resp = self
            .client
            .delete(url)
            .json(&json!({ "scroll_id": [cursor] }))
            .send()?;
        if !resp.status().is_success() {
            anyhow::bail!("cluster answered {} to scroll deletion", resp.status());
        }
        Ok(())
    }
}
