//! Minimal attribute-safe markup writing shared by the layer renderers.

use std::borrow::Cow;

pub(crate) fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '<', '>']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Append ` name="value"` to `out`.
pub(crate) fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

/// Like [`push_attr`], but skips empty values.
pub(crate) fn push_non_empty_attr(out: &mut String, name: &str, value: &str) {
    if !value.is_empty() {
        push_attr(out, name, value);
    }
}

/// Join class tokens, dropping empty ones and stray whitespace.
pub(crate) fn join_classes<'a>(
    tokens: impl IntoIterator<Item = &'a str>,
) -> String {
    tokens
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
