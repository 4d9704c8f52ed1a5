//! Telegram HTML rendering for articles and greetings.

use crate::domain::Article;

pub const DIGEST_HEADER: &str = "🌠 Daily Space News:";

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Article body: bold title, summary, and a "Read more" link.
///
/// The link line is left out when the article has no url (the sentinel), since
/// Telegram rejects anchors with an empty `href`.
pub fn article_html(article: &Article) -> String {
    let mut out = format!(
        "<b>{}</b>\n{}",
        escape_html(&article.title),
        escape_html(&article.summary)
    );
    if !article.url.trim().is_empty() {
        out.push_str(&format!(
            "\n\n🔗 <a href=\"{}\">Read more</a>",
            escape_html(article.url.trim())
        ));
    }
    out
}

/// On-demand reply to the "Latest News" button.
pub fn news_reply_html(article: &Article) -> String {
    format!("🛰️ {}", article_html(article))
}

/// Message delivered to every subscriber by the daily broadcast.
pub fn digest_html(article: &Article) -> String {
    format!("{DIGEST_HEADER}\n{}", article_html(article))
}

pub fn greeting_html(first_name: &str) -> String {
    format!(
        "👋 Welcome, {}! I’ll keep you updated with space news.",
        escape_html(first_name)
    )
}
