//! Buffered sink for sanitized log lines, with a sorted final pass.

use crate::error::{ExportError, Result};
use crate::util::{create_with_backoff, replace_file_atomic_backoff};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Accumulates lines and appends them to the sink in fixed-size batches.
/// The sink is truncated at construction so repeated runs never append to
/// stale data. `finish` flushes the remainder and rewrites the whole file
/// sorted lexically ascending; callers must not rely on input order, only on
/// the line set being complete.
pub struct BufferedWriter {
    path: PathBuf,
    file: File,
    batch: Vec<String>,
    flush_every: usize,
}

impl BufferedWriter {
    pub fn create(path: &Path, flush_every: usize) -> Result<Self> {
        let file = create_with_backoff(path, 16, 50).map_err(ExportError::SinkWrite)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            batch: Vec::with_capacity(flush_every.max(1)),
            flush_every: flush_every.max(1),
        })
    }

    /// Buffer one sanitized line; appends the whole batch to the sink each
    /// time the accumulated count reaches the flush threshold. Write failures
    /// are fatal: unflushed data cannot be recovered.
    pub fn push(&mut self, line: String) -> Result<()> {
        self.batch.push(line);
        if self.batch.len() >= self.flush_every {
            self.flush_batch()?;
        }
        Ok(())
    }

    fn flush_batch(&mut self) -> Result<()> {
        let mut out = Vec::with_capacity(self.batch.iter().map(|l| l.len() + 1).sum());
        for line in self.batch.drain(..) {
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }
        self.file.write_all(&out).map_err(ExportError::SinkWrite)
    }

    /// Flush any partial batch, then rewrite the file's full contents sorted
    /// ascending (in memory) and promote it atomically. Returns the sink path.
    pub fn finish(mut self) -> Result<PathBuf> {
        if !self.batch.is_empty() {
            self.flush_batch()?;
        }
        self.file.flush().map_err(ExportError::SinkWrite)?;
        drop(self.file);

        let contents = fs::read_to_string(&self.path).map_err(ExportError::SinkWrite)?;
        let mut lines: Vec<&str> = contents.lines().collect();
        lines.sort_unstable();

        let tmp = self.path.with_extension("sorting");
        {
            let f = create_with_backoff(&tmp, 16, 50).map_err(ExportError::SinkWrite)?;
            let mut w = BufWriter::new(f);
            for line in &lines {
                w.write_all(line.as_bytes()).map_err(ExportError::SinkWrite)?;
                w.write_all(b"\n").map_err(ExportError::SinkWrite)?;
            }
            w.flush().map_err(ExportError::SinkWrite)?;
        }
        replace_file_atomic_backoff(&tmp, &self.path).map_err(ExportError::SinkWrite)?;
        Ok(self.path)
    }
}
