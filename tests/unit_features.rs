// Unit tests for bio signals and account feature extraction.
//
// Covers the field-level fallbacks (missing bio, bad timestamps, zero
// counts), trusted-set membership, and mapping from the API user shape.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use trustcheck::scoring::bio::{extract_bio_signals, BioSignals, CRYPTO_KEYWORDS};
use trustcheck::scoring::features::{
    account_age_days, extract_features, ProfileMetadata, TRUSTED_NETWORK_SCORE,
};
use trustcheck::trust::trusted_set::TrustedSet;
use trustcheck::x::search::{PublicMetrics, User};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 9, 30, 0).unwrap()
}

fn profile(handle: &str) -> ProfileMetadata {
    ProfileMetadata {
        handle: handle.to_string(),
        created_at: Some("2023-03-15T09:30:00.000Z".to_string()),
        bio: Some("Gardener, reader, occasional baker.".to_string()),
        verified: false,
        followers_count: 250,
        following_count: 180,
        tweet_count: 3200,
    }
}

// ============================================================
// Bio signals
// ============================================================

#[test]
fn empty_bio_has_no_signals() {
    assert_eq!(
        extract_bio_signals(Some("")),
        BioSignals {
            length: 0,
            has_crypto_keywords: false,
            has_links: false,
        }
    );
}

#[test]
fn every_keyword_is_detected() {
    for kw in CRYPTO_KEYWORDS {
        let bio = format!("I like {}", kw.to_uppercase());
        assert!(extract_bio_signals(Some(&bio)).has_crypto_keywords, "{kw}");
    }
}

#[test]
fn plain_bio_has_no_crypto() {
    let signals = extract_bio_signals(Some("Gardener, reader, occasional baker."));
    assert!(!signals.has_crypto_keywords);
    assert!(!signals.has_links);
    assert_eq!(signals.length, 35);
}

#[test]
fn link_needs_non_whitespace_after_scheme() {
    assert!(extract_bio_signals(Some("shop: https://t.co/abc")).has_links);
    assert!(!extract_bio_signals(Some("https:// nothing")).has_links);
}

// ============================================================
// Feature extraction
// ============================================================

#[test]
fn extracts_all_fields() {
    let trusted = TrustedSet::default();
    let f = extract_features(&profile("gardener"), &trusted, now()).unwrap();
    assert_eq!(f.handle, "gardener");
    assert_eq!(f.account_age_days, 731); // 2024 is a leap year
    assert!((f.follower_following_ratio - 250.0 / 180.0).abs() < 1e-9);
    assert_eq!(f.bio.length, 35);
    assert!(!f.is_verified);
    assert_eq!(f.followers_count, 250);
    assert_eq!(f.following_count, 180);
    assert_eq!(f.tweet_count, 3200);
    assert_eq!(f.trust_network_score, 0);
}

#[test]
fn missing_handle_returns_none() {
    let trusted = TrustedSet::default();
    assert!(extract_features(&profile(""), &trusted, now()).is_none());
    assert!(extract_features(&profile("   "), &trusted, now()).is_none());
    assert!(extract_features(&profile("@"), &trusted, now()).is_none());
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let trusted = TrustedSet::default();
    let bare = ProfileMetadata {
        handle: "bare".to_string(),
        ..Default::default()
    };
    let f = extract_features(&bare, &trusted, now()).unwrap();
    assert_eq!(f.account_age_days, 0);
    assert_eq!(f.follower_following_ratio, 0.0);
    assert_eq!(f.bio, BioSignals::default());
    assert_eq!(f.followers_count, 0);
}

#[test]
fn bad_timestamp_is_age_zero() {
    let trusted = TrustedSet::default();
    let mut p = profile("someone");
    p.created_at = Some("not a date".to_string());
    let f = extract_features(&p, &trusted, now()).unwrap();
    assert_eq!(f.account_age_days, 0);
}

#[test]
fn naive_timestamp_uses_local_time() {
    let created = Local.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
    let now = (created + Duration::days(100) + Duration::hours(3)).with_timezone(&Utc);
    assert_eq!(account_age_days(Some("2024-01-10T08:00:00"), now), 100);
    assert_eq!(account_age_days(Some("2024-01-10 08:00:00"), now), 100);
}

#[test]
fn age_is_independent_of_now_timezone_representation() {
    let a = account_age_days(Some("2025-01-01T00:00:00+09:00"), now());
    let b = account_age_days(Some("2024-12-31T15:00:00Z"), now());
    assert_eq!(a, b);
}

#[test]
fn following_nobody_is_infinite_ratio() {
    let trusted = TrustedSet::default();
    let mut p = profile("broadcaster");
    p.followers_count = 100;
    p.following_count = 0;
    let f = extract_features(&p, &trusted, now()).unwrap();
    assert!(f.follower_following_ratio.is_infinite());
    assert!(f.follower_following_ratio.is_sign_positive());
}

#[test]
fn trusted_membership_is_case_insensitive() {
    let trusted = TrustedSet::parse("# trusted\n@GardenClub\n");
    let f = extract_features(&profile("gardenclub"), &trusted, now()).unwrap();
    assert_eq!(f.trust_network_score, TRUSTED_NETWORK_SCORE);

    let f = extract_features(&profile("@GARDENCLUB"), &trusted, now()).unwrap();
    assert_eq!(f.trust_network_score, TRUSTED_NETWORK_SCORE);
    assert_eq!(f.handle, "GARDENCLUB");
}

#[test]
fn non_member_scores_zero() {
    let trusted = TrustedSet::from_handles(["someone_else"]);
    let f = extract_features(&profile("gardener"), &trusted, now()).unwrap();
    assert_eq!(f.trust_network_score, 0);
}

// ============================================================
// API user → ProfileMetadata
// ============================================================

#[test]
fn profile_from_full_user() {
    let json = r#"{
        "id": "2244994945",
        "username": "XDevelopers",
        "name": "Developers",
        "created_at": "2013-12-14T04:35:55.000Z",
        "description": "The voice of the X Dev platform",
        "verified": true,
        "public_metrics": {
            "followers_count": 583423,
            "following_count": 2048,
            "tweet_count": 14052,
            "listed_count": 1672
        }
    }"#;
    let user: User = serde_json::from_str(json).unwrap();
    let p = ProfileMetadata::from(&user);
    assert_eq!(p.handle, "XDevelopers");
    assert_eq!(p.created_at.as_deref(), Some("2013-12-14T04:35:55.000Z"));
    assert!(p.verified);
    assert_eq!(p.followers_count, 583_423);
    assert_eq!(p.following_count, 2048);
    assert_eq!(p.tweet_count, 14_052);
}

#[test]
fn profile_from_sparse_user() {
    let json = r#"{"id": "1", "username": "quiet"}"#;
    let user: User = serde_json::from_str(json).unwrap();
    let p = ProfileMetadata::from(&user);
    assert_eq!(p.handle, "quiet");
    assert!(p.created_at.is_none());
    assert!(p.bio.is_none());
    assert!(!p.verified);
    assert_eq!(p.followers_count, 0);
}

#[test]
fn profile_from_partial_metrics() {
    let user = User {
        id: "7".to_string(),
        username: "partial".to_string(),
        public_metrics: Some(PublicMetrics {
            followers_count: 12,
            ..Default::default()
        }),
        ..Default::default()
    };
    let p = ProfileMetadata::from(&user);
    assert_eq!(p.followers_count, 12);
    assert_eq!(p.following_count, 0);
}
