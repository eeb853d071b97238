// Colored terminal output for single-account checks and the trusted list.
//
// The bot itself only posts plain reply text; this is for the operator
// running `trustcheck check` or `trustcheck trusted` by hand.

use colored::Colorize;

use super::format_count;
use crate::scoring::engine::{ScoreResult, TrustTier, SCORE_REFERENCE_MAX};
use crate::scoring::features::AccountFeatures;
use crate::trust::trusted_set::TrustedSet;

/// Display a full breakdown of one account's assessment.
pub fn display_assessment(features: &AccountFeatures, result: &ScoreResult) {
    println!(
        "\n{}",
        format!("=== Trust check for @{} ===", features.handle).bold()
    );

    println!("  Assessment: {}", colorize_tier(result.tier()));
    println!(
        "  Trust score: {:.1}/{:.0}",
        result.trust_score, SCORE_REFERENCE_MAX
    );

    println!("\n  Features:");
    println!("    Account age:     {} days", features.account_age_days);
    println!(
        "    Followers:       {}  Following: {}  Posts: {}",
        format_count(features.followers_count),
        format_count(features.following_count),
        format_count(features.tweet_count),
    );
    let ratio = if features.follower_following_ratio.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.2}", features.follower_following_ratio)
    };
    println!("    Follow ratio:    {ratio}");
    println!(
        "    Verified:        {}",
        if features.is_verified { "yes" } else { "no" }
    );
    println!(
        "    Bio:             {} chars, crypto keywords: {}, links: {}",
        features.bio.length,
        yes_no(features.bio.has_crypto_keywords),
        yes_no(features.bio.has_links),
    );
    println!(
        "    Trust network:   {}",
        features.trust_network_score
    );

    if !result.positive_factors.is_empty() {
        println!("\n  Positive factors:");
        for factor in &result.positive_factors {
            println!("    {} {}", "+".green(), factor);
        }
    }
    if !result.risk_factors.is_empty() {
        println!("\n  Risk factors:");
        for factor in &result.risk_factors {
            println!("    {} {}", "!".red(), factor);
        }
    }
}

/// Display the loaded trusted-handle list.
pub fn display_trusted_set(trusted: &TrustedSet) {
    if trusted.is_empty() {
        println!("No trusted accounts loaded. Check TRUSTED_LIST_URL.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Trusted accounts ({}) ===", trusted.len()).bold()
    );
    for handle in trusted.sorted() {
        println!("  @{handle}");
    }
}

fn yes_no(flag: bool) -> colored::ColoredString {
    if flag {
        "yes".yellow()
    } else {
        "no".normal()
    }
}

/// Colorize a trust tier.
fn colorize_tier(tier: TrustTier) -> colored::ColoredString {
    match tier {
        TrustTier::Trustworthy => tier.as_str().green().bold(),
        TrustTier::Caution => tier.as_str().yellow(),
        TrustTier::HighRisk => tier.as_str().red().bold(),
    }
}
