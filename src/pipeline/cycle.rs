// Bot cycle: search → match → extract → score → render → reply.
//
// One cycle handles at most one trigger. Nothing in here is fatal: a failed
// search ends the cycle, an unusable profile is skipped, and a failed reply
// is reported but leaves the post marked processed so we never retry it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use super::trigger::{ProcessedSet, TriggerMatcher};
use crate::output::report;
use crate::scoring::engine::{self, TrustTier};
use crate::scoring::features;
use crate::trust::trusted_set::TrustedSet;
use crate::x::client::trigger_query;
use crate::x::traits::Platform;

/// Posts fetched per search.
pub const BATCH_SIZE: u32 = 10;

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The search call failed; try again next cycle
    SearchFailed,
    /// No unprocessed candidate in the batch qualified
    NoMatch { candidates: usize },
    /// Matched, but the subject's profile was unusable; no reply sent
    Skipped { post_id: String },
    Replied {
        post_id: String,
        handle: String,
        tier: TrustTier,
        reply_id: String,
    },
    ReplyFailed { post_id: String, handle: String },
}

impl CycleOutcome {
    pub fn replied(&self) -> bool {
        matches!(self, CycleOutcome::Replied { .. })
    }
}

/// Run one cycle against the platform.
pub async fn run_cycle(
    platform: &dyn Platform,
    matcher: &TriggerMatcher,
    trusted: &TrustedSet,
    processed: &mut ProcessedSet,
    now: DateTime<Utc>,
) -> CycleOutcome {
    let query = trigger_query(matcher.phrase());

    let batch = match platform.search_recent(&query, BATCH_SIZE).await {
        Ok(batch) => batch,
        Err(e) => {
            warn!(error = %e, "Search failed");
            return CycleOutcome::SearchFailed;
        }
    };

    let Some(found) = matcher.find_match(&batch, processed) else {
        return CycleOutcome::NoMatch {
            candidates: batch.data.len(),
        };
    };

    let Some(account) = features::extract_features(&found.subject, trusted, now) else {
        info!(post_id = found.post_id.as_str(), "Subject profile unusable, not replying");
        return CycleOutcome::Skipped {
            post_id: found.post_id,
        };
    };

    let result = engine::score_account(&account);
    let tier = result.tier();

    info!(
        handle = account.handle.as_str(),
        score = format!("{:.1}", result.trust_score),
        tier = tier.as_str(),
        age_days = account.account_age_days,
        trusted = (account.trust_network_score > 0),
        "Scored account"
    );

    let text = report::render(Some((&account, &result)));

    match platform.post_reply(&found.post_id, &text).await {
        Ok(reply_id) => {
            info!(
                post_id = found.post_id.as_str(),
                reply_id = reply_id.as_str(),
                "Posted trust report"
            );
            CycleOutcome::Replied {
                post_id: found.post_id,
                handle: account.handle,
                tier,
                reply_id,
            }
        }
        Err(e) => {
            warn!(post_id = found.post_id.as_str(), error = %e, "Failed to post reply");
            CycleOutcome::ReplyFailed {
                post_id: found.post_id,
                handle: account.handle,
            }
        }
    }
}

/// Poll until shutdown is signalled. Returns the number of replies posted.
///
/// Shutdown is only checked between cycles, so a cycle in progress always
/// finishes.
pub async fn run_loop(
    platform: &dyn Platform,
    matcher: &TriggerMatcher,
    trusted: &TrustedSet,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> usize {
    let mut processed = ProcessedSet::new();
    let mut replies = 0;

    loop {
        if *shutdown.borrow() {
            break;
        }

        let outcome = run_cycle(platform, matcher, trusted, &mut processed, Utc::now()).await;
        if outcome.replied() {
            replies += 1;
        }

        info!(
            processed = processed.len(),
            replies = replies,
            next_in_secs = interval.as_secs(),
            "Cycle complete"
        );

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = shutdown.changed() => {
                // Sender dropped: nobody can ask us to stop anymore, keep going
                if changed.is_err() {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    info!(replies = replies, "Stopped polling");
    replies
}
