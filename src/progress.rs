//! Progress reporting: count-style bar driven by the declared hit total.

use indicatif::{ProgressBar, ProgressStyle};

/// Count-style progress bar (documents exported out of the declared total).
/// The total is whatever the cluster claimed on the first page, so the bar
/// can finish short when a scroll lapses mid-export.
pub fn make_count_progress(total: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} {pos}/{len} docs [{bar:.cyan/blue}] {percent:>3}%  \
         {per_sec}  elapsed: {elapsed_precise}",
    )
    .unwrap()
    .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);
    if !label.is_empty() {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
