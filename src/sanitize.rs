//! Record sanitization: one raw hit's message becomes exactly one output line.

/// Strip a leading syslog-style priority tag (`<digits>` at position zero)
/// and collapse embedded line breaks to nothing. Idempotent: running it on
/// already-clean input returns the input unchanged.
pub fn sanitize_message(raw: &str) -> String {
    let rest = strip_priority_tag(raw);
    if rest.contains(['\n', '\r']) {
        rest.chars().filter(|c| *c != '\n' && *c != '\r').collect()
    } else {
        rest.to_string()
    }
}

fn strip_priority_tag(s: &str) -> &str {
    let Some(inner) = s.strip_prefix('<') else {
        return s;
    };
    match inner.find('>') {
        Some(i) if i > 0 && inner[..i].bytes().all(|b| b.is_ascii_digit()) => &inner[i + 1..],
        _ => s,
    }
}
