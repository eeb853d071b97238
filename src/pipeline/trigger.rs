// Trigger matching: pick the next reply that asks for a trust check.
//
// A candidate qualifies when it is a direct reply, mentions the trigger
// phrase, hasn't been handled yet this run, and the author of the post it
// replies to can be resolved from the batch's includes. That author is the
// account we assess.

use std::collections::HashSet;

use tracing::debug;

use crate::scoring::features::ProfileMetadata;
use crate::x::search::{SearchResponse, Tweet};

/// Post ids already handled this process lifetime. Only ever grows.
#[derive(Debug, Default)]
pub struct ProcessedSet {
    ids: HashSet<String>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, post_id: &str) -> bool {
        self.ids.contains(post_id)
    }

    /// Mark a post as handled. Returns false if it already was.
    pub fn mark(&mut self, post_id: &str) -> bool {
        self.ids.insert(post_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A trigger post paired with the account it asks about.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerMatch {
    /// The reply that invoked the bot; our answer goes under it
    pub post_id: String,
    /// Author of the post being replied to
    pub subject: ProfileMetadata,
}

pub struct TriggerMatcher {
    /// Lower-cased trigger phrase
    phrase: String,
}

impl TriggerMatcher {
    pub fn new(phrase: &str) -> Self {
        Self {
            phrase: phrase.trim().to_lowercase(),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Find the first qualifying candidate in the batch.
    ///
    /// The match is marked processed before it is returned, so it will not
    /// be picked again even if scoring or replying fails downstream.
    pub fn find_match(
        &self,
        batch: &SearchResponse,
        processed: &mut ProcessedSet,
    ) -> Option<TriggerMatch> {
        for tweet in &batch.data {
            if processed.contains(&tweet.id) {
                continue;
            }

            let Some(parent_id) = tweet.replied_to() else {
                continue;
            };

            if !tweet.text.to_lowercase().contains(&self.phrase) {
                continue;
            }

            let Some(subject) = resolve_parent_author(batch, tweet, parent_id) else {
                debug!(post_id = tweet.id.as_str(), "Could not resolve replied-to author");
                continue;
            };

            processed.mark(&tweet.id);
            return Some(TriggerMatch {
                post_id: tweet.id.clone(),
                subject,
            });
        }

        None
    }
}

/// Resolve the author of the replied-to post from the batch includes.
///
/// Prefers the expanded parent post's `author_id`; falls back to the reply's
/// own `in_reply_to_user_id` when the parent wasn't included.
fn resolve_parent_author(
    batch: &SearchResponse,
    tweet: &Tweet,
    parent_id: &str,
) -> Option<ProfileMetadata> {
    let author_id = batch
        .includes
        .tweet(parent_id)
        .and_then(|parent| parent.author_id.as_deref())
        .or(tweet.in_reply_to_user_id.as_deref())?;

    batch.includes.user(author_id).map(ProfileMetadata::from)
}
