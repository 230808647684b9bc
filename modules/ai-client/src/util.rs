/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Strip a surrounding markdown code fence from a model response.
///
/// Handles an opening fence with or without a language tag (```` ```json ````,
/// ```` ```JSON ````, bare ```` ``` ````) and a trailing fence. Text without a
/// fence is returned trimmed.
pub fn strip_code_blocks(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag: everything up to the first newline, as long as
    // it is a bare word (```json\n{...}).
    let body = match rest.find('\n') {
        Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[idx + 1..]
        }
        _ => rest
            .trim_start_matches("json")
            .trim_start_matches("JSON"),
    };

    body.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_char_boundary() {
        let text = "Hello 世界";
        let truncated = truncate_to_char_boundary(text, 8);
        assert!(truncated.len() <= 8);
        assert!(text.starts_with(truncated));
    }

    #[test]
    fn test_truncate_within_bounds() {
        let text = "Hello";
        assert_eq!(truncate_to_char_boundary(text, 100), "Hello");
    }

    #[test]
    fn test_strip_code_blocks() {
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("{}"), "{}");
    }

    #[test]
    fn strip_uppercase_language_tag() {
        assert_eq!(strip_code_blocks("```JSON\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strip_single_line_fence() {
        assert_eq!(strip_code_blocks("```json {\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn strip_leaves_inner_backticks_alone() {
        let raw = "```json\n{\"summary\":\"use `cargo`\"}\n```";
        assert_eq!(strip_code_blocks(raw), "{\"summary\":\"use `cargo`\"}");
    }

    #[test]
    fn strip_surrounding_whitespace() {
        assert_eq!(strip_code_blocks("  \n```json\n{}\n```\n  "), "{}");
    }
}
