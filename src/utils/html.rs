// src/utils/html.rs

//! Small HTML helpers for destination table cells.

/// Decode the five entities produced by the job-detail endpoint.
///
/// `&amp;` is decoded last so that a single pass never double-decodes:
/// `&amp;lt;` becomes `&lt;`, not `<`.
pub fn unescape_html(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Render items as an HTML unordered list.
pub fn bullet_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut list = String::from("<ul>");
    for item in items {
        list.push_str("<li>");
        list.push_str(item.as_ref());
        list.push_str("</li>");
    }
    list.push_str("</ul>");
    list
}
