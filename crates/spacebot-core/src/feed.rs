//! News feed client.
//!
//! Fetches the newest article from a JSON endpoint shaped like the Spaceflight
//! News API (`{"results": [{"title", "summary", "url", ...}]}`).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{domain::Article, errors::Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Network(String),

    #[error("feed returned HTTP {0}")]
    Status(u16),

    #[error("feed response is malformed: {0}")]
    Parse(String),

    #[error("feed returned no articles")]
    Empty,
}

#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// One fetch, with the reason for failure.
    async fn try_fetch(&self) -> std::result::Result<Article, FeedError>;

    /// Latest article, or [`Article::sentinel`] if the fetch failed.
    async fn fetch_latest(&self) -> Article {
        match self.try_fetch().await {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!(error = %e, "news fetch failed, using placeholder article");
                Article::sentinel()
            }
        }
    }
}

#[derive(Deserialize)]
struct FeedPage {
    results: Vec<FeedItem>,
}

#[derive(Deserialize)]
struct FeedItem {
    title: String,
    summary: String,
    url: String,
}

#[derive(Clone, Debug)]
pub struct HttpFeedClient {
    url: String,
    http: reqwest::Client,
}

impl HttpFeedClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::External(format!("http client build failed: {e}")))?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }
}

#[async_trait]
impl NewsFeed for HttpFeedClient {
    async fn try_fetch(&self) -> std::result::Result<Article, FeedError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        let page: FeedPage =
            serde_json::from_str(&body).map_err(|e| FeedError::Parse(e.to_string()))?;

        let item = page.results.into_iter().next().ok_or(FeedError::Empty)?;
        Ok(Article {
            title: item.title,
            summary: item.summary,
            url: item.url,
        })
    }
}
