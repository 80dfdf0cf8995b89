mod cluster;
mod config;
mod date;
mod error;
mod indices;
mod pipeline;
mod progress;
mod query;
mod sanitize;
mod scroll;
mod util;
mod writer;

pub use crate::config::ExportOptions;
pub use crate::error::ExportError;
pub use crate::pipeline::{ExportOutcome, LogExport};

// Expose the cluster seam so callers can drive exports against their own
// cluster implementations (tests use a scripted one).
pub use crate::cluster::{HitPage, HttpCluster, IndexSelection, ScrollOpen, ScrollPage, SearchCluster, MATCH_FIELD};

// Expose the building blocks for direct use.
pub use crate::date::LogTimestamp;
pub use crate::indices::{filter_existing, resolve_indices};
pub use crate::query::build_query;
pub use crate::sanitize::sanitize_message;
pub use crate::scroll::ScrollSession;
pub use crate::writer::BufferedWriter;
