/// Guess whether pasted plain text is markdown worth converting.
///
/// The text counts as markdown when it starts with a heading, quote, fence,
/// bullet or ordered marker, or when it contains a link or image anywhere.
///
/// ```rust
/// # use marknext_markdown::is_likely_markdown;
/// assert!(is_likely_markdown("  # Title"));
/// assert!(is_likely_markdown("see [docs](https://docs.rs)"));
/// assert!(!is_likely_markdown("just a sentence."));
/// ```
pub fn is_likely_markdown(text: &str) -> bool {
    let text = text.trim();
    if text.starts_with('#') || text.starts_with('>') || text.starts_with("```") {
        return true;
    }
    if let Some(rest) = text.strip_prefix(['-', '*', '+']) {
        if rest.starts_with(char::is_whitespace) {
            return true;
        }
    }
    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = text[digits..].strip_prefix('.') {
            if rest.starts_with(char::is_whitespace) {
                return true;
            }
        }
    }
    contains_link(text)
}

/// Whether `text` contains `[label](destination)` with both parts non-empty.
fn contains_link(text: &str) -> bool {
    text.match_indices('[').any(|(open, _)| {
        let rest = &text[open + 1..];
        let Some(close) = rest.find(']') else {
            return false;
        };
        if close == 0 {
            return false;
        }
        let Some(destination) = rest[close + 1..].strip_prefix('(') else {
            return false;
        };
        matches!(destination.find(')'), Some(end) if end > 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_starts() {
        assert!(is_likely_markdown("> quoted"));
        assert!(is_likely_markdown("```\ncode\n```"));
        assert!(is_likely_markdown("- item"));
        assert!(is_likely_markdown("+\titem"));
        assert!(is_likely_markdown("12. item"));
        assert!(!is_likely_markdown("-item"));
        assert!(!is_likely_markdown("3.14 is pi"));
        assert!(!is_likely_markdown(""));
    }

    #[test]
    fn links_and_images_anywhere() {
        assert!(is_likely_markdown("text ![alt](img.png) text"));
        assert!(is_likely_markdown("[] then [a](b)"));
        assert!(!is_likely_markdown("[](b)"));
        assert!(!is_likely_markdown("[a]()"));
        assert!(!is_likely_markdown("[a] (b)"));
    }
}
