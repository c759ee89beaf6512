use time::OffsetDateTime;

pub(in crate::tui_shell) fn fmt_since(ts: OffsetDateTime, now: OffsetDateTime) -> String {
    let secs = (now - ts).whole_seconds().max(0);
    let mins = secs / 60;
    let hours = mins / 60;

    if secs < 10 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else {
        format!("{}h ago", hours)
    }
}
