const MAX_VISIBLE_LENGTH: usize = 120;
const DATA_URL_MARKER: &str = "data:";

/// Sanitizes user message text for safe logging: truncates long messages and
/// inline base64 payloads, and redacts credential-looking patterns.
pub fn sanitize_message(message: &str) -> String {
    let trimmed = message.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let truncated = truncate_data_urls(trimmed);

    let sanitized = if truncated.chars().count() > MAX_VISIBLE_LENGTH {
        let visible: String = truncated.chars().take(MAX_VISIBLE_LENGTH).collect();
        format!("{}... ({} chars total)", visible, truncated.chars().count())
    } else {
        truncated
    };

    redact_sensitive_patterns(&sanitized)
}

/// Inline image payloads make log lines unreadable; keep only the MIME prefix.
fn truncate_data_urls(text: &str) -> String {
    match text.find(DATA_URL_MARKER) {
        Some(idx) => {
            let prefix_end = text[idx..]
                .find(',')
                .map(|i| idx + i + 1)
                .unwrap_or(text.len());
            format!("{}[data truncated]", &text[..prefix_end])
        }
        None => text.to_string(),
    }
}

fn redact_sensitive_patterns(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("key=", "key=[REDACTED]"),
        ("password=", "password=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        if let Some(idx) = result.find(pattern) {
            let end = result[idx + pattern.len()..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| idx + pattern.len() + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
        }
    }

    result
}
