//! Netscape Bookmark HTML codec.
//!
//! Parses the interchange format exported by Edge/Chrome/Firefox into flat
//! bookmark records and serializes a bookmark list back to the same
//! dialect.

use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::model::Bookmark;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("static selector"));

/// Parse a Netscape Bookmark HTML document into bookmark records.
///
/// Lossy-tolerant: every `<a>` element becomes a candidate record, and
/// records whose URL does not start with `http` are discarded (javascript:,
/// mailto: and relative links are deliberately excluded). A link-free
/// document yields an empty list, not an error.
pub fn parse(html: &str) -> Vec<Bookmark> {
    let doc = Html::parse_document(html);
    let now_ms = Utc::now().timestamp_millis();

    doc.select(&ANCHOR_SELECTOR)
        .filter_map(|link| {
            let url = link.value().attr("href").unwrap_or_default();
            if !url.starts_with("http") {
                return None;
            }

            let title = link.text().collect::<String>();
            let title = title.trim();
            let title = if title.is_empty() { "Untitled" } else { title };

            // ADD_DATE is epoch seconds in the wire format.
            let date_added = link
                .value()
                .attr("add_date")
                .and_then(|s| s.parse::<i64>().ok())
                .map(|secs| secs * 1000)
                .unwrap_or(now_ms);

            let mut bookmark = Bookmark::new(title, url, date_added);
            if let Some(icon) = link.value().attr("icon") {
                bookmark = bookmark.with_icon(icon);
            }
            Some(bookmark)
        })
        .collect()
}

/// Serialize bookmarks back to Netscape Bookmark HTML.
///
/// Bookmarks are grouped into one folder per category, categories in
/// first-seen order and members in original list order. Folder headers are
/// stamped with the export time; each link keeps its own `date_added`.
pub fn generate(bookmarks: &[Bookmark]) -> String {
    let now_secs = Utc::now().timestamp();

    let mut categories: Vec<&str> = Vec::new();
    for b in bookmarks {
        if !categories.contains(&b.category.as_str()) {
            categories.push(&b.category);
        }
    }

    let mut html = String::from(
        "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n\
         <!-- This is an automatically generated file.\n     \
         It will be read and overwritten.\n     \
         DO NOT EDIT! -->\n\
         <META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n\
         <TITLE>Bookmarks</TITLE>\n\
         <H1>Bookmarks</H1>\n\
         <DL><p>\n",
    );

    for category in categories {
        html.push_str(&format!(
            "    <DT><H3 ADD_DATE=\"{now_secs}\" LAST_MODIFIED=\"{now_secs}\">{category}</H3>\n    <DL><p>\n"
        ));

        for b in bookmarks.iter().filter(|b| b.category == category) {
            let date = b.date_added / 1000;
            let icon = b.icon.as_deref().unwrap_or("");
            html.push_str(&format!(
                "        <DT><A HREF=\"{}\" ADD_DATE=\"{}\" ICON=\"{}\">{}</A>\n",
                b.url, date, icon, b.title
            ));
        }

        html.push_str("    </DL><p>\n");
    }

    html.push_str("</DL><p>");
    html
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
