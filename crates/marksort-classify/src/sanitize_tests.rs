use super::*;
use marksort_core::Bookmark;

fn bookmark(title: &str, url: &str) -> Bookmark {
    Bookmark::new(title, url, 0)
}

#[test]
fn test_compact_assigns_positional_tokens() {
    let bookmarks = vec![
        bookmark("a", "https://a.example/"),
        bookmark("b", "https://b.example/"),
        bookmark("c", "https://c.example/"),
    ];
    let (records, map) = compact(&bookmarks);

    assert_eq!(records.len(), 3);
    for (n, record) in records.iter().enumerate() {
        assert_eq!(record.i, n.to_string());
    }
    // The token map is a bijection back to the original ids.
    assert_eq!(map.len(), 3);
    for (n, b) in bookmarks.iter().enumerate() {
        assert_eq!(map.get(&n.to_string()), Some(&b.id));
    }
}

#[test]
fn test_compact_record_shape() {
    let bookmarks = vec![bookmark("Rust Blog", "https://blog.rust-lang.org/post")];
    let (records, _) = compact(&bookmarks);
    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["i"], "0");
    assert_eq!(json["t"], "Rust Blog");
    assert_eq!(json["u"], "rust-lang.org");
}

#[test]
fn test_sanitize_title_removes_keywords() {
    assert_eq!(sanitize_title("Election results tracker"), "results tracker");
    assert!(!sanitize_title("VOTE now vote often").to_lowercase().contains("vote"));
}

#[test]
fn test_sanitize_title_filters_characters_and_collapses_whitespace() {
    assert_eq!(sanitize_title("Hello <world> — rust!"), "Hello world rust");
    assert_eq!(sanitize_title("a   b\t\nc"), "a b c");
}

#[test]
fn test_sanitize_title_keeps_cjk() {
    assert_eq!(sanitize_title("技术文档"), "技术文档");
}

#[test]
fn test_sanitize_title_empty_falls_back() {
    assert_eq!(sanitize_title(""), "bookmark");
    assert_eq!(sanitize_title("@#$%^&*"), "bookmark");
}

#[test]
fn test_sanitize_title_truncates_to_35_chars() {
    let long = "a".repeat(80);
    assert_eq!(sanitize_title(&long).chars().count(), 35);
}

#[test]
fn test_extract_domain_with_fallback() {
    assert_eq!(extract_domain("https://www.example.com/path?q=1"), "www.example.com");
    // Unparseable URLs fall back to a raw prefix.
    let fallback = extract_domain("not a url at all but quite a long string here");
    assert_eq!(fallback.chars().count(), 30);
}

#[test]
fn test_sanitize_domain_strips_www_and_keeps_last_two_labels() {
    assert_eq!(sanitize_domain("www.example.com"), "example.com");
    assert_eq!(sanitize_domain("foo.bar.example.com"), "example.com");
    assert_eq!(sanitize_domain("localhost"), "localhost");
}

#[test]
fn test_sanitize_domain_replaces_sensitive_hosts() {
    assert_eq!(sanitize_domain("www.whitehouse.gov"), "misc");
    assert_eq!(sanitize_domain("twitter.com"), "misc");
    assert_eq!(sanitize_domain("news.bbc.com"), "misc");
    assert_eq!(sanitize_domain(""), "misc");
}
