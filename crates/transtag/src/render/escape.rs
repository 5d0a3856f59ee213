//! HTML escaping for rendered values.

/// Escape the characters that are special in HTML text and attributes.
///
/// ```
/// use transtag::render::escape_html;
///
/// assert_eq!(escape_html(r#"<b class="x">Tom & 'Jerry'"#),
///     "&lt;b class=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;");
/// ```
pub fn escape_html(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}
