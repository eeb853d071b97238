// Platform trait: the seam between the assessment engine and the network.
//
// The cycle only needs two calls: search for trigger posts and reply to one.
// Keeping them behind a trait lets tests drive a full cycle with canned data,
// and lets dry-run mode swap out the write path.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::search::SearchResponse;

/// Read/write access to the social platform.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Fetch a batch of recent posts matching the query, with author and
    /// referenced-post expansions.
    async fn search_recent(&self, query: &str, max_results: u32) -> Result<SearchResponse>;

    /// Reply to a post. Returns the id of the created reply.
    async fn post_reply(&self, in_reply_to: &str, text: &str) -> Result<String>;
}

/// Wraps a real platform but only logs replies instead of posting them.
pub struct DryRunPlatform<P> {
    inner: P,
}

impl<P: Platform> DryRunPlatform<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: Platform> Platform for DryRunPlatform<P> {
    async fn search_recent(&self, query: &str, max_results: u32) -> Result<SearchResponse> {
        self.inner.search_recent(query, max_results).await
    }

    async fn post_reply(&self, in_reply_to: &str, text: &str) -> Result<String> {
        info!(
            in_reply_to = in_reply_to,
            chars = text.chars().count(),
            "Dry run: reply not posted"
        );
        println!("--- dry run reply to {in_reply_to} ---\n{text}\n---");
        Ok(format!("dry-run-{in_reply_to}"))
    }
}
