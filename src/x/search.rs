// Serde types for X API v2 post and user payloads.
//
// Only the fields the bot reads are modeled. Everything the API may omit is
// Option or defaulted, so a sparse response still deserializes.

use serde::{Deserialize, Serialize};

/// Response from `GET /2/tweets/search/recent`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Tweet>,
    #[serde(default)]
    pub includes: Includes,
    pub meta: Option<SearchMeta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMeta {
    pub result_count: Option<u32>,
    pub newest_id: Option<String>,
    pub oldest_id: Option<String>,
}

/// Side-table of expanded objects referenced by the posts in `data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub tweets: Vec<Tweet>,
}

impl Includes {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn tweet(&self, id: &str) -> Option<&Tweet> {
        self.tweets.iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
    pub author_id: Option<String>,
    pub in_reply_to_user_id: Option<String>,
    #[serde(default)]
    pub referenced_tweets: Vec<ReferencedTweet>,
    pub created_at: Option<String>,
}

impl Tweet {
    /// Id of the post this one directly replies to, if any.
    pub fn replied_to(&self) -> Option<&str> {
        self.referenced_tweets
            .iter()
            .find(|r| r.kind == ReferenceKind::RepliedTo)
            .map(|r| r.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencedTweet {
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    RepliedTo,
    Quoted,
    Retweeted,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub name: Option<String>,
    pub created_at: Option<String>,
    pub description: Option<String>,
    pub verified: Option<bool>,
    pub public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub tweet_count: u64,
    #[serde(default)]
    pub listed_count: u64,
}

/// Response from `GET /2/users/by/username/:username`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserLookupResponse {
    pub data: Option<User>,
}

/// Body for `POST /2/tweets` when replying.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReplyRequest<'a> {
    pub text: &'a str,
    pub reply: ReplyTarget<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyTarget<'a> {
    pub in_reply_to_tweet_id: &'a str,
}

/// Response from `POST /2/tweets`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTweetResponse {
    pub data: CreatedTweet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTweet {
    pub id: String,
}
