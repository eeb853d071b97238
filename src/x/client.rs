// X API v2 client: bearer-token HTTP over reqwest.
//
// Search and user lookup use the app-only bearer token. Posting a reply needs
// a user-context OAuth 2.0 access token with the tweet.write scope, so the
// client carries both and checks for the right one per call.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::search::{
    CreateReplyRequest, CreateTweetResponse, ReplyTarget, SearchResponse, User,
    UserLookupResponse,
};
use super::traits::Platform;

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.x.com";

pub const USER_AGENT: &str = "trustcheck/0.1 (account-trust-bot)";

/// Fields requested for every expanded user object.
pub const USER_FIELDS: &str = "created_at,description,verified,public_metrics";

const TWEET_FIELDS: &str = "author_id,referenced_tweets,in_reply_to_user_id,created_at";
const EXPANSIONS: &str =
    "author_id,referenced_tweets.id,referenced_tweets.id.author_id,in_reply_to_user_id";

/// Thin reqwest wrapper for the handful of X API v2 endpoints the bot uses.
pub struct XClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
    user_access_token: String,
}

impl XClient {
    /// Create a client. Either token may be empty; calls that need a missing
    /// token fail with a clear error instead of a 401.
    pub fn new(base_url: &str, bearer_token: &str, user_access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.to_string(),
            user_access_token: user_access_token.to_string(),
        })
    }

    /// GET an API path with the app bearer token and deserialize the body.
    async fn api_get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        if self.bearer_token.is_empty() {
            anyhow::bail!("X_BEARER_TOKEN not set; cannot call {path}");
        }

        let url = format!("{}{}", self.base_url, path);
        debug!(path = path, "X API GET request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(params)
            .send()
            .await
            .with_context(|| format!("X API request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("X API {path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))
    }

    /// Look up a single account's profile by handle.
    ///
    /// Returns `Ok(None)` when the account doesn't exist or is suspended
    /// (the API answers 200 with an `errors` array and no `data`).
    pub async fn lookup_user(&self, handle: &str) -> Result<Option<User>> {
        let handle = handle.trim_start_matches('@');
        let path = format!("/2/users/by/username/{handle}");
        let resp: UserLookupResponse = self
            .api_get(&path, &[("user.fields", USER_FIELDS)])
            .await
            .with_context(|| format!("Failed to look up @{handle}"))?;
        Ok(resp.data)
    }
}

#[async_trait]
impl Platform for XClient {
    async fn search_recent(&self, query: &str, max_results: u32) -> Result<SearchResponse> {
        // The endpoint rejects max_results outside 10..=100
        let max_results = max_results.clamp(10, 100).to_string();

        self.api_get(
            "/2/tweets/search/recent",
            &[
                ("query", query),
                ("max_results", max_results.as_str()),
                ("expansions", EXPANSIONS),
                ("tweet.fields", TWEET_FIELDS),
                ("user.fields", USER_FIELDS),
            ],
        )
        .await
    }

    async fn post_reply(&self, in_reply_to: &str, text: &str) -> Result<String> {
        if self.user_access_token.is_empty() {
            anyhow::bail!("X_USER_ACCESS_TOKEN not set; cannot post replies");
        }

        let url = format!("{}/2/tweets", self.base_url);
        let body = CreateReplyRequest {
            text,
            reply: ReplyTarget {
                in_reply_to_tweet_id: in_reply_to,
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.user_access_token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Reply request failed for post {in_reply_to}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("X API reply to {in_reply_to} returned {status}: {body}");
        }

        let created: CreateTweetResponse = response
            .json()
            .await
            .context("Failed to parse reply response")?;

        Ok(created.data.id)
    }
}

/// Build the recent-search query for a trigger phrase: quoted phrase, replies
/// only, no retweets.
pub fn trigger_query(phrase: &str) -> String {
    let phrase = phrase.replace('"', "");
    format!("\"{phrase}\" is:reply -is:retweet")
}
