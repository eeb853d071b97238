// Trusted-handle allow-list, fetched once at startup.
//
// The list is plain text, one handle per line, with `#` comments. Loading is
// fail-open: if the fetch fails we carry on with an empty set, which simply
// means no account gets the trust-network bonus this run.

use std::collections::HashSet;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Where the raw allow-list text comes from.
#[async_trait]
pub trait TrustedListSource: Send + Sync {
    /// Fetch the raw list body.
    async fn fetch(&self) -> Result<String>;
}

/// Fetches the allow-list from a fixed URL.
pub struct HttpListSource {
    client: reqwest::Client,
    url: String,
}

impl HttpListSource {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::x::client::USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl TrustedListSource for HttpListSource {
    async fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Trusted list request failed: {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Trusted list returned {status}");
        }

        response
            .text()
            .await
            .context("Failed to read trusted list body")
    }
}

/// Lower-cased, `@`-stripped handles of accounts we vouch for.
#[derive(Debug, Clone, Default)]
pub struct TrustedSet {
    handles: HashSet<String>,
}

impl TrustedSet {
    /// Load the set from a source. Never fails; transport errors degrade to
    /// an empty set.
    pub async fn load(source: &dyn TrustedListSource) -> Self {
        match source.fetch().await {
            Ok(body) => {
                let set = Self::parse(&body);
                info!(count = set.len(), "Loaded trusted accounts");
                set
            }
            Err(e) => {
                warn!(error = %e, "Could not load trusted accounts, continuing without them");
                Self::default()
            }
        }
    }

    /// Parse the newline-delimited list format.
    pub fn parse(body: &str) -> Self {
        let handles: HashSet<String> = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(normalize_handle)
            .filter(|handle| !handle.is_empty())
            .collect();

        debug!(count = handles.len(), "Parsed trusted list");
        Self { handles }
    }

    pub fn from_handles<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            handles: handles
                .into_iter()
                .map(|h| normalize_handle(h.as_ref()))
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// Case-insensitive membership check; a leading `@` is ignored.
    pub fn contains(&self, handle: &str) -> bool {
        self.handles.contains(&normalize_handle(handle))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handles in sorted order, for display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut handles: Vec<&str> = self.handles.iter().map(String::as_str).collect();
        handles.sort_unstable();
        handles
    }
}

/// Strip `@`, trim, lower-case.
pub fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').trim().to_lowercase()
}
