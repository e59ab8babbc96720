mod extract;

/// One product as the vendor export lays it out.
pub(crate) fn product_block(title: &str, setup: &str, actual: Option<&str>) -> String {
    let mut out = format!(
        "<div class=\"item\">Title[_sep2_]{title}[_sep1_]Description[_sep2_]<p>Inflatable rental.</p><ul><li><strong>Setup Area:</strong> {setup}</li>"
    );
    if let Some(actual) = actual {
        out.push_str(&format!("<li><strong>Actual Size:</strong> {actual}</li>"));
    }
    out.push_str("</ul></div>\n");
    out
}

/// Markup-free padding that keeps neighbouring products outside each other's window.
pub(crate) fn filler(chars: usize) -> String {
    "lorem ipsum ".repeat(chars / 12 + 1)
}
