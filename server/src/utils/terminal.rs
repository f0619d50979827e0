//! Terminal output helpers

/// Format a URL as a clickable terminal hyperlink if stdout supports it.
///
/// Uses OSC 8 escape sequences where available and falls back to plain
/// cyan text.
pub fn terminal_link(url: &str) -> String {
    format_link(
        url,
        supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout),
    )
}

fn format_link(url: &str, hyperlinks: bool) -> String {
    if hyperlinks {
        // OSC 8: \x1b]8;;URL\x07TEXT\x1b]8;;\x07
        format!("\x1b]8;;{url}\x07\x1b[36m{url}\x1b[0m\x1b]8;;\x07")
    } else {
        format!("\x1b[36m{url}\x1b[0m")
    }
}
