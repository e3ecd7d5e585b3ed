//! Sanitization and compaction.
//!
//! Minimizes the payload sent to the remote classifier and strips content
//! likely to trip a provider's content filters. Bookmarks are reduced to a
//! positional token plus a sanitized title and domain; the token-to-id map
//! never leaves the process. Pure and synchronous, no I/O.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use marksort_core::Bookmark;

/// Title keywords removed before transmission, case-insensitive.
static SENSITIVE_KEYWORDS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)政治|党|国|共|民主|自由|人权|抗议|革命|独立",
        r"(?i)president|congress|election|vote|protest|freedom",
        r"(?i)trump|biden|obama|putin|xi|习",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Domains replaced wholesale with a neutral marker. Covers political,
/// restricted-press, and restricted-platform hosts.
static SENSITIVE_DOMAINS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)gov\.",
        r"(?i)government",
        r"(?i)congress",
        r"(?i)parliament",
        r"(?i)whitehouse",
        r"(?i)kremlin",
        r"(?i)cpc",
        r"(?i)xinhua",
        r"(?i)bbc\.com",
        r"(?i)cnn\.com",
        r"(?i)nytimes",
        r"(?i)reuters",
        r"(?i)rfa\.org",
        r"(?i)voa",
        r"(?i)epoch",
        r"(?i)ntd",
        r"(?i)twitter",
        r"(?i)x\.com",
        r"(?i)facebook",
        r"(?i)telegram",
        r"(?i)wiki.*leak",
        r"(?i)tor",
        r"(?i)vpn",
        r"(?i)proxy",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// ASCII word characters, CJK ideographs, whitespace, and a small set of
/// CJK punctuation survive; everything else is dropped.
static RETAINED_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9A-Za-z_\x{4E00}-\x{9FFF}\s\-.，。！？、：；]").expect("static pattern")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Compact payload record sent to the classifier: positional token,
/// sanitized title, sanitized domain.
#[derive(Debug, Clone, Serialize)]
pub struct CompactBookmark {
    pub i: String,
    pub t: String,
    pub u: String,
}

/// Map each bookmark to a positional token ("0", "1", ...) and a compact,
/// sanitized record. Returns the records plus the local token-to-id map.
pub fn compact(bookmarks: &[Bookmark]) -> (Vec<CompactBookmark>, HashMap<String, String>) {
    let mut token_to_id = HashMap::with_capacity(bookmarks.len());
    let records = bookmarks
        .iter()
        .enumerate()
        .map(|(index, b)| {
            let token = index.to_string();
            token_to_id.insert(token.clone(), b.id.clone());
            CompactBookmark {
                i: token,
                t: sanitize_title(&truncate(&b.title, 40)),
                u: sanitize_domain(&extract_domain(&b.url)),
            }
        })
        .collect();
    (records, token_to_id)
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Strip sensitive keywords and disallowed characters from a title,
/// collapse whitespace, and cap the length. Falls back to a neutral
/// literal when nothing survives.
pub fn sanitize_title(title: &str) -> String {
    let mut result = title.to_string();
    for pattern in SENSITIVE_KEYWORDS.iter() {
        result = pattern.replace_all(&result, "").into_owned();
    }
    let result = RETAINED_CHARS.replace_all(&result, "");
    let result = WHITESPACE.replace_all(&result, " ");
    let result = truncate(result.trim(), 35);
    if result.is_empty() {
        "bookmark".to_string()
    } else {
        result
    }
}

/// Hostname of the URL, or the first 30 characters of the raw string when
/// it does not parse.
pub fn extract_domain(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
        Err(_) => truncate(url, 30),
    }
}

/// Reduce a hostname to its last two labels; sensitive hosts are replaced
/// with a neutral `"misc"` marker.
pub fn sanitize_domain(domain: &str) -> String {
    if domain.is_empty() {
        return "misc".to_string();
    }

    let d = domain.to_lowercase();
    let d = d.strip_prefix("www.").unwrap_or(&d);

    if SENSITIVE_DOMAINS.iter().any(|p| p.is_match(d)) {
        return "misc".to_string();
    }

    let labels: Vec<&str> = d.split('.').collect();
    if labels.len() >= 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        d.to_string()
    }
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
