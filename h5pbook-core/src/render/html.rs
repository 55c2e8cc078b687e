//! HTML post-processing for rendered text

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Class attached to every rendered table
pub const TABLE_CLASS: &str = "h5pbook-table";

/// Paragraph used when rendering yields nothing
pub const EMPTY_PARAGRAPH: &str = "<p>&nbsp;</p>";

const IMAGE_PLACEHOLDER_STYLE: &str = "display:block;border:2px dashed #9e9e9e;\
padding:1em;margin:0.5em 0;text-align:center;color:#616161;background:#fafafa";

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("img pattern is valid"));

static SRC_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bsrc\s*=\s*"([^"]*)""#).expect("src pattern is valid"));

static TABLE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<table(\s[^>]*)?>").expect("table pattern is valid"));

static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*"([^"]*)""#).expect("class pattern is valid")
});

/// Apply every text post-processing step
pub fn postprocess(html: &str) -> String {
    let html = replace_images(html);
    let html = add_table_classes(&html);
    non_empty(html)
}

/// Replace every `<img>` with a styled placeholder naming the original file
pub fn replace_images(html: &str) -> String {
    IMG_TAG_RE
        .replace_all(html, |caps: &Captures| {
            let filename = SRC_ATTR_RE
                .captures(&caps[0])
                .map(|src| file_name(&src[1]).to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "image".to_string());
            image_placeholder(&filename)
        })
        .into_owned()
}

/// Placeholder markup standing in for an image
pub fn image_placeholder(filename: &str) -> String {
    format!(
        r#"<span class="h5pbook-image-placeholder" style="{}">[Image: {}]</span>"#,
        IMAGE_PLACEHOLDER_STYLE, filename
    )
}

/// Attach [`TABLE_CLASS`] to every `<table>` element
pub fn add_table_classes(html: &str) -> String {
    TABLE_TAG_RE
        .replace_all(html, |caps: &Captures| {
            let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            if CLASS_ATTR_RE.is_match(attrs) {
                let attrs = CLASS_ATTR_RE.replace(attrs, |c: &Captures| {
                    format!("class=\"{} {}\"", &c[1], TABLE_CLASS)
                });
                format!("<table{}>", attrs)
            } else {
                format!("<table class=\"{}\"{}>", TABLE_CLASS, attrs)
            }
        })
        .into_owned()
}

/// Map an empty rendering to a single non-breaking-space paragraph
pub fn non_empty(html: String) -> String {
    if html.trim().is_empty() {
        EMPTY_PARAGRAPH.to_string()
    } else {
        html
    }
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn file_name(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
