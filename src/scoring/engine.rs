// Trust scoring engine: weighted heuristic rules over account features.
//
// Rules are grouped into bands. Within a band the first matching rule wins;
// bands themselves are independent and always evaluated in the same order.
// Each rule may add to the score and record one positive or risk factor.
//
// This is a pure function of its input: no clock, no I/O, no randomness.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::features::AccountFeatures;

/// Reference maximum used when displaying a score as "x/7". Scores can
/// exceed it; it is never used to clamp.
pub const SCORE_REFERENCE_MAX: f64 = 7.0;

/// Assessment category derived from the trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustTier {
    Trustworthy,
    Caution,
    HighRisk,
}

impl TrustTier {
    /// Map a trust score to its tier. Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 5.0 => TrustTier::Trustworthy,
            s if s >= 3.0 => TrustTier::Caution,
            _ => TrustTier::HighRisk,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustTier::Trustworthy => "TRUSTWORTHY",
            TrustTier::Caution => "CAUTION",
            TrustTier::HighRisk => "HIGH_RISK",
        }
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub trust_score: f64,
    /// In evaluation order
    pub positive_factors: Vec<String>,
    /// In evaluation order
    pub risk_factors: Vec<String>,
}

impl ScoreResult {
    pub fn tier(&self) -> TrustTier {
        TrustTier::from_score(self.trust_score)
    }
}

/// A factor string recorded by a rule.
#[derive(Debug, Clone, Copy)]
enum Factor {
    Positive(&'static str),
    Risk(&'static str),
}

/// One guarded rule: if `guard` holds, add `delta` and record `factor`.
struct Band {
    guard: fn(&AccountFeatures) -> bool,
    delta: f64,
    factor: Option<Factor>,
}

/// Account age, first match wins. 30-89 days matches nothing.
const AGE_BANDS: &[Band] = &[
    Band {
        guard: |f| f.account_age_days > 365,
        delta: 2.0,
        factor: Some(Factor::Positive("Established account")),
    },
    Band {
        guard: |f| f.account_age_days >= 90,
        delta: 1.0,
        factor: Some(Factor::Positive("Mature account")),
    },
    Band {
        guard: |f| f.account_age_days < 30,
        delta: 0.0,
        factor: Some(Factor::Risk("Very new account")),
    },
];

/// Follower/following ratio, first match wins. (10, 100] and [0.01, 0.1)
/// intentionally match nothing.
const RATIO_BANDS: &[Band] = &[
    Band {
        guard: |f| f.follower_following_ratio == f64::INFINITY,
        delta: 1.0,
        factor: Some(Factor::Positive("Many followers, following few")),
    },
    Band {
        guard: |f| (0.1..=10.0).contains(&f.follower_following_ratio),
        delta: 1.0,
        factor: Some(Factor::Positive("Balanced follow ratio")),
    },
    Band {
        guard: |f| f.follower_following_ratio > 100.0,
        delta: 0.0,
        factor: Some(Factor::Positive("High follower ratio")),
    },
    Band {
        guard: |f| f.follower_following_ratio < 0.01,
        delta: 0.0,
        factor: Some(Factor::Risk("Following many, few followers")),
    },
];

/// Trust-network membership, first match wins. The last band always matches.
const TRUST_BANDS: &[Band] = &[
    Band {
        guard: |f| f.trust_network_score >= 5,
        delta: 3.0,
        factor: Some(Factor::Positive("Verified trusted account")),
    },
    Band {
        guard: |f| f.trust_network_score >= 2,
        delta: 2.0,
        factor: Some(Factor::Positive("Trusted connections")),
    },
    Band {
        guard: |_| true,
        delta: 0.0,
        factor: Some(Factor::Risk("No verified trust connections")),
    },
];

const VERIFIED: &[Band] = &[Band {
    guard: |f| f.is_verified,
    delta: 1.0,
    factor: Some(Factor::Positive("Verified account")),
}];

const BIO_LENGTH: &[Band] = &[Band {
    guard: |f| f.bio.length > 20,
    delta: 0.5,
    factor: None,
}];

const BIO_RISK: &[Band] = &[Band {
    guard: |f| f.bio.has_crypto_keywords && f.bio.length < 30,
    delta: 0.0,
    factor: Some(Factor::Risk("Minimal crypto bio")),
}];

const AUDIENCE: &[Band] = &[Band {
    guard: |f| f.followers_count > 10_000,
    delta: 0.5,
    factor: Some(Factor::Positive("Large following")),
}];

/// All rule groups in evaluation order.
const RULES: &[&[Band]] = &[
    AGE_BANDS,
    RATIO_BANDS,
    TRUST_BANDS,
    VERIFIED,
    BIO_LENGTH,
    BIO_RISK,
    AUDIENCE,
];

/// Score an account's features.
pub fn score_account(features: &AccountFeatures) -> ScoreResult {
    let mut result = ScoreResult {
        trust_score: 0.0,
        positive_factors: Vec::new(),
        risk_factors: Vec::new(),
    };

    for group in RULES {
        let Some(band) = group.iter().find(|band| (band.guard)(features)) else {
            continue;
        };

        result.trust_score += band.delta;
        match band.factor {
            Some(Factor::Positive(text)) => result.positive_factors.push(text.to_string()),
            Some(Factor::Risk(text)) => result.risk_factors.push(text.to_string()),
            None => {}
        }
    }

    result
}
