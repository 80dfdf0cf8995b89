#![allow(dead_code)] // shared across test binaries; not all of them use every helper

use logscroll::{
    ExportError, HitPage, IndexSelection, ScrollOpen, ScrollPage, SearchCluster,
};
use serde_json::json;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the scripted cluster serves for one page fetch.
pub enum ScriptedPage {
    Hits(Vec<String>),
    /// Raw hit documents, for shapes the `Hits` helper cannot express.
    Raw(Vec<serde_json::Value>),
    Expired,
}

/// Convenience: a page of hits from message literals.
pub fn hits(msgs: &[&str]) -> ScriptedPage {
    ScriptedPage::Hits(msgs.iter().map(|s| s.to_string()).collect())
}

/// A `SearchCluster` that replays a fixed page script and records every call,
/// so tests can assert call counts and the cursor-cleanup invariant.
pub struct MockCluster {
    pages: Mutex<Vec<ScriptedPage>>,
    /// `None` means every index exists.
    pub existing: Option<Vec<String>>,
    pub fail_deletes: bool,
    /// When set, every page renews to the same token (servers may do this).
    pub fixed_cursor: bool,
    total: u64,

    pub deleted: Mutex<Vec<String>>,
    pub searched: Mutex<Vec<(IndexSelection, String)>>,
    pub exists_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub next_calls: AtomicUsize,
    cursor_seq: AtomicUsize,
}

impl MockCluster {
    pub fn scripted(pages: Vec<ScriptedPage>) -> Self {
        let total = pages
            .iter()
            .map(|p| match p {
                ScriptedPage::Hits(v) => v.len() as u64,
                ScriptedPage::Raw(v) => v.len() as u64,
                ScriptedPage::Expired => 0,
            })
            .sum();
        Self {
            pages: Mutex::new(pages),
            existing: None,
            fail_deletes: false,
            fixed_cursor: false,
            total,
            deleted: Mutex::new(Vec::new()),
            searched: Mutex::new(Vec::new()),
            exists_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            next_calls: AtomicUsize::new(0),
            cursor_seq: AtomicUsize::new(0),
        }
    }

    /// Every wire operation issued so far, deletion included.
    pub fn network_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
            + self.search_calls.load(Ordering::SeqCst)
            + self.next_calls.load(Ordering::SeqCst)
            + self.deleted.lock().unwrap().len()
    }

    pub fn deleted_tokens(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn issue_cursor(&self) -> String {
        if self.fixed_cursor {
            "c0".to_string()
        } else {
            format!("c{}", self.cursor_seq.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn pop_page(&self) -> ScriptedPage {
        let mut pages = self.pages.lock().unwrap();
        assert!(!pages.is_empty(), "cluster script exhausted");
        pages.remove(0)
    }

    fn page_of(msgs: Vec<String>) -> HitPage {
        HitPage {
            docs: msgs
                .into_iter()
                .map(|m| json!({ "_source": { "message": m } }))
                .collect(),
        }
    }
}

impl SearchCluster for MockCluster {
    fn index_exists(&self, name: &str) -> Result<bool, ExportError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .existing
            .as_ref()
            .map_or(true, |v| v.iter().any(|e| e == name)))
    }

    fn search(
        &self,
        selection: &IndexSelection,
        query: &str,
        _page_size: usize,
        _ttl: std::time::Duration,
    ) -> Result<ScrollOpen, ExportError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.searched
            .lock()
            .unwrap()
            .push((selection.clone(), query.to_string()));
        match self.pop_page() {
            ScriptedPage::Hits(msgs) => Ok(ScrollOpen {
                page: Self::page_of(msgs),
                total: self.total,
                cursor: self.issue_cursor(),
            }),
            ScriptedPage::Raw(docs) => Ok(ScrollOpen {
                page: HitPage { docs },
                total: self.total,
                cursor: self.issue_cursor(),
            }),
            ScriptedPage::Expired => panic!("script expired on the initial page"),
        }
    }

    fn scroll_next(&self, _cursor: &str, _ttl: std::time::Duration) -> Result<ScrollPage, ExportError> {
        self.next_calls.fetch_add(1, Ordering::SeqCst);
        match self.pop_page() {
            ScriptedPage::Hits(msgs) => Ok(ScrollPage {
                page: Self::page_of(msgs),
                cursor: self.issue_cursor(),
            }),
            ScriptedPage::Raw(docs) => Ok(ScrollPage {
                page: HitPage { docs },
                cursor: self.issue_cursor(),
            }),
            ScriptedPage::Expired => Err(ExportError::ScrollExpired),
        }
    }

    fn delete_scroll(&self, cursor: &str) -> anyhow::Result<()> {
        self.deleted.lock().unwrap().push(cursor.to_string());
        if self.fail_deletes {
            anyhow::bail!("deletion refused by script");
        }
        Ok(())
    }
}

/// Read a text file line-by-line into strings (skips empty lines).
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
