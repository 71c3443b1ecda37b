//! Logging utilities for sanitizing free-text user input (goals, usernames)
//! so log lines stay single-line. Escapes control characters that otherwise
//! break log readability.

/// Escape a string for single-line logging:
/// - `\n` => `\\n`
/// - `\r` => `\\r`
/// - `\t` => `\\t`
/// - backslash => `\\\\`
///   Truncates very long strings (over `MAX_PREVIEW`) with an ellipsis to cap log noise.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 120; // goals are short free text; keep previews tight
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                // Represent other control chars as hex \xNN
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn escapes_newlines_and_tabs() {
        let s = "improve\nsleep\r\tnow";
        assert_eq!(escape_log(s), "improve\\nsleep\\r\\tnow");
    }

    #[test]
    fn truncates_long_goals() {
        let s = "g".repeat(500);
        let esc = escape_log(&s);
        assert!(esc.ends_with('…'));
        assert!(esc.chars().count() <= 121);
    }
}
