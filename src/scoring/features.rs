// Account feature extraction: raw profile metadata in, normalized features out.
//
// Every field has a documented fallback so extraction never half-fails: a bad
// timestamp becomes age 0, a missing bio becomes empty signals, missing counts
// become 0. Only a profile with no handle at all is rejected.
//
// No network calls happen here. The trusted set is already in memory and
// "now" is passed in, so the same inputs always give the same features.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

use super::bio::{extract_bio_signals, BioSignals};
use crate::trust::trusted_set::TrustedSet;
use crate::x::search::User;

/// Trust-network score for an account on the curated list.
pub const TRUSTED_NETWORK_SCORE: u8 = 5;

/// Profile metadata as supplied by the platform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileMetadata {
    pub handle: String,
    /// Creation timestamp as the API reported it (usually RFC 3339)
    pub created_at: Option<String>,
    pub bio: Option<String>,
    pub verified: bool,
    pub followers_count: u64,
    pub following_count: u64,
    pub tweet_count: u64,
}

impl From<&User> for ProfileMetadata {
    fn from(user: &User) -> Self {
        let metrics = user.public_metrics.clone().unwrap_or_default();
        Self {
            handle: user.username.clone(),
            created_at: user.created_at.clone(),
            bio: user.description.clone(),
            verified: user.verified.unwrap_or(false),
            followers_count: metrics.followers_count,
            following_count: metrics.following_count,
            tweet_count: metrics.tweet_count,
        }
    }
}

/// Normalized features the scoring engine works from.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountFeatures {
    pub handle: String,
    pub account_age_days: u64,
    /// followers / following; `f64::INFINITY` when following nobody but
    /// followed by someone
    pub follower_following_ratio: f64,
    pub bio: BioSignals,
    pub is_verified: bool,
    pub followers_count: u64,
    pub following_count: u64,
    pub tweet_count: u64,
    /// 0 or [`TRUSTED_NETWORK_SCORE`]
    pub trust_network_score: u8,
}

/// Extract features from a profile.
///
/// Returns `None` if the profile has no usable handle; the caller should
/// skip the account rather than reply.
pub fn extract_features(
    profile: &ProfileMetadata,
    trusted: &TrustedSet,
    now: DateTime<Utc>,
) -> Option<AccountFeatures> {
    let handle = profile.handle.trim().trim_start_matches('@');
    if handle.is_empty() {
        debug!("Profile has no handle, skipping feature extraction");
        return None;
    }

    let trust_network_score = if trusted.contains(handle) {
        TRUSTED_NETWORK_SCORE
    } else {
        0
    };

    Some(AccountFeatures {
        handle: handle.to_string(),
        account_age_days: account_age_days(profile.created_at.as_deref(), now),
        follower_following_ratio: follower_ratio(
            profile.followers_count,
            profile.following_count,
        ),
        bio: extract_bio_signals(profile.bio.as_deref()),
        is_verified: profile.verified,
        followers_count: profile.followers_count,
        following_count: profile.following_count,
        tweet_count: profile.tweet_count,
        trust_network_score,
    })
}

/// Whole days between the creation timestamp and `now`.
///
/// Timestamps with an offset are compared in that offset; naive timestamps
/// are taken as local time. Absent, unparsable, or future timestamps give 0.
pub fn account_age_days(created_at: Option<&str>, now: DateTime<Utc>) -> u64 {
    let raw = match created_at.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return 0,
    };

    let days = if let Some(created) = parse_with_offset(raw) {
        (now.with_timezone(created.offset()) - created).num_days()
    } else if let Some(created) = parse_naive(raw)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
    {
        (now.with_timezone(&Local) - created).num_days()
    } else {
        debug!(created_at = raw, "Unparsable creation timestamp, using age 0");
        return 0;
    };

    days.max(0) as u64
}

fn parse_with_offset(raw: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        // v1.1-style "Wed Oct 10 20:19:24 +0000 2018"
        .or_else(|_| DateTime::parse_from_str(raw, "%a %b %d %H:%M:%S %z %Y"))
        .ok()
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// followers / following with the zero cases collapsed:
/// no followers → 0, followers but following nobody → +infinity.
pub fn follower_ratio(followers: u64, following: u64) -> f64 {
    match (followers, following) {
        (0, _) => 0.0,
        (_, 0) => f64::INFINITY,
        (f, g) => f as f64 / g as f64,
    }
}
