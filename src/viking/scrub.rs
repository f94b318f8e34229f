use std::borrow::Cow;

const REDACTED: &str = "[REDACTED]";

/// Longest error body kept in log events.
const MAX_LOGGED_CHARS: usize = 500;

const TOKEN_MARKERS: [&str; 6] = [
    "Bearer ",
    "bearer ",
    "\"api_key\":\"",
    "\"apiKey\":\"",
    "api_key=",
    "\"authorization\":\"",
];

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn redact_after(text: &mut String, marker: &str) {
    let mut from = 0;
    while let Some(rel) = text[from..].find(marker) {
        let start = from + rel + marker.len();
        let len: usize = text[start..]
            .chars()
            .take_while(|c| is_token_char(*c))
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            from = start;
            continue;
        }
        text.replace_range(start..start + len, REDACTED);
        from = start + REDACTED.len();
    }
}

/// Redact the configured API key and bearer/api-key style tokens from text
/// bound for log events.
pub fn scrub_secrets<'a>(text: &'a str, api_key: &str) -> Cow<'a, str> {
    let has_key = !api_key.is_empty() && text.contains(api_key);
    let has_marker = TOKEN_MARKERS.iter().any(|m| text.contains(m));
    if !has_key && !has_marker {
        return Cow::Borrowed(text);
    }

    let mut scrubbed = if has_key {
        text.replace(api_key, REDACTED)
    } else {
        text.to_string()
    };
    for marker in TOKEN_MARKERS {
        redact_after(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub and truncate an error body for logging.
pub fn loggable(text: &str, api_key: &str) -> String {
    let scrubbed = scrub_secrets(text, api_key);
    if scrubbed.chars().count() <= MAX_LOGGED_CHARS {
        return scrubbed.into_owned();
    }
    let truncated: String = scrubbed.chars().take(MAX_LOGGED_CHARS).collect();
    format!("{truncated}...")
}
