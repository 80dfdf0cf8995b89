use anyhow::Result;
use logscroll::LogExport;
use std::env;
use std::time::Duration;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn main() -> Result<()> {
    let host = env_or("LOGSCROLL_HOST", "localhost");
    let port: u16 = env_or("LOGSCROLL_PORT", "9200").parse()?;
    let ttl_secs: u64 = env_or("LOGSCROLL_TTL_SECS", "1800").parse()?;
    let page_size: usize = env_or("LOGSCROLL_PAGE_SIZE", "100").parse()?;

    let mut export = LogExport::new()
        .host(host, port)
        .page_size(page_size)
        .scroll_ttl(Duration::from_secs(ttl_secs))
        .verbose(env::var("LOGSCROLL_VERBOSE").is_ok());

    if let Ok(prefixes) = env::var("LOGSCROLL_PREFIXES") {
        export = export.prefixes(prefixes.split(',').map(str::trim).map(String::from));
    }
    if let Ok(q) = env::var("LOGSCROLL_QUERY") {
        export = export.query(q);
    }
    if let Ok(t) = env::var("LOGSCROLL_TAG") {
        export = export.tag(t);
    }
    export = export.time_range(env::var("LOGSCROLL_START").ok(), env::var("LOGSCROLL_END").ok());
    if let Ok(p) = env::var("LOGSCROLL_OUT") {
        export = export.out_path(p);
    }

    let outcome = export.run()?;
    println!(
        "exported {} of {} documents{}{}",
        outcome.count,
        outcome.total,
        if outcome.finished { "" } else { " (partial)" },
        outcome
            .out_path
            .map(|p| format!(" to {}", p.display()))
            .unwrap_or_default()
    );
    Ok(())
}
