use super::*;

use pulldown_cmark::escape::{escape_href, escape_html};

/// Escape `&`, `<`, `>` and `"` so text can be placed in markup, including
/// inside double quoted attribute values.
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    // Writing into a `String` never reports an io error.
    if let Err(error) = escape_html(&mut escaped, text) {
        tracing::warn!(%error, "failed to escape text");
    }
    Cow::Owned(escaped)
}

/// Escape a link destination for an `href` attribute.
pub(crate) fn escape_url(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    if let Err(error) = escape_href(&mut escaped, url) {
        tracing::warn!(%error, url, "failed to escape url");
    }
    escaped
}
