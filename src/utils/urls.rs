use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").unwrap());

/// 解析为http/https链接，其他协议或不合法的字符串返回None
pub fn parse_web_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url),
        _ => None,
    }
}

/// 按逗号、空白、换行切分自由文本，只保留能解析为链接的词，保持原顺序
pub fn extract_urls(text: &str) -> Vec<String> {
    TOKEN_SEPARATOR
        .split(text)
        .filter(|token| !token.is_empty())
        .filter(|token| parse_web_url(token).is_some())
        .map(|token| token.to_string())
        .collect()
}
