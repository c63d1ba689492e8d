use std::sync::LazyLock;

use regex::Regex;

use crate::util::misc::vec_dedup;

// 記事本文中の天鳳牌譜ビューアへのリンク
// 本文はHTMLなのでリンクの終わりには必ず'"'がある
static LOG_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://tenhou\.net/5/#json=[^"]*""#).unwrap());

// 本文から牌譜URLを出現順に抽出 (重複は最初の1つのみ)
pub fn extract_log_urls(body: &str) -> Vec<String> {
    let urls = LOG_URL
        .find_iter(body)
        .map(|m| m.as_str().trim_end_matches('"').to_string())
        .collect();
    vec_dedup(urls)
}

#[test]
fn test_extract_log_urls() {
    let body = concat!(
        r#"<p>東1局</p><a href="https://tenhou.net/5/#json={%22a%22:1}">1</a>"#,
        r#"<p>東2局</p><a href="http://tenhou.net/5/#json={%22a%22:2}">2</a>"#,
        r#"<p>再掲</p><a href="https://tenhou.net/5/#json={%22a%22:1}">1</a>"#,
        r#"<a href="https://example.com/5/#json={}">x</a>"#,
        r#"<a href="https://tenhou.net/6/#json={}">y</a>"#,
    );
    assert_eq!(
        extract_log_urls(body),
        vec![
            "https://tenhou.net/5/#json={%22a%22:1}",
            "http://tenhou.net/5/#json={%22a%22:2}",
        ]
    );
}

#[test]
fn test_extract_log_urls_empty() {
    assert!(extract_log_urls("").is_empty());
    // 閉じる'"'がないものは対象外
    assert!(extract_log_urls("https://tenhou.net/5/#json={}").is_empty());
}

#[test]
fn test_extract_log_urls_case_sensitive() {
    let body = r#""https://tenhou.net/5/#json=A" "https://tenhou.net/5/#json=a" "https://tenhou.net/5/#json=A""#;
    assert_eq!(
        extract_log_urls(body),
        vec!["https://tenhou.net/5/#json=A", "https://tenhou.net/5/#json=a"]
    );
}
