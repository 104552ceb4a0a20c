//! Logging helpers that keep user input and narration on a single log line.

const MAX_PREVIEW: usize = 200;

/// Escape a string for single-line logging and cap it at a short preview.
///
/// Newlines, carriage returns and tabs become `\n`, `\r` and `\t`; other
/// control characters become `\xNN`.
pub fn escape_log(s: &str) -> String {
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
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// One-line summary of a batch of narrative lines for debug logs.
pub fn preview_lines(lines: &[String]) -> String {
    match lines {
        [] => "(no output)".to_string(),
        [only] => escape_log(only),
        [first, rest @ ..] => format!("{} (+{} more)", escape_log(first), rest.len()),
    }
}
