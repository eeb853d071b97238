// Reply report: the short fixed-layout text posted back to the thread.
//
// Layout, one item per line, in this order:
//   1. @handle
//   2. tier + score against the /7 reference
//   3. age, followers, following
//   4. up to two positive factors (omitted if none)
//   5. up to two risk factors (omitted if none)
//
// At most five lines and two factors per line keeps the text well under the
// post limit; a final character cap enforces it regardless of handle length.

use super::{format_count, truncate_chars};
use crate::scoring::engine::{ScoreResult, SCORE_REFERENCE_MAX};
use crate::scoring::features::AccountFeatures;

/// Hard platform limit for a single post, in characters.
pub const MAX_REPORT_CHARS: usize = 280;

/// Factors shown per line.
pub const MAX_FACTORS_PER_LINE: usize = 2;

/// Reply text when an account could not be analyzed.
pub const UNABLE_TO_ANALYZE: &str = "Unable to analyze this account right now.";

/// Render a report, or the fixed fallback text when there is no analysis.
pub fn render(analysis: Option<(&AccountFeatures, &ScoreResult)>) -> String {
    match analysis {
        Some((features, result)) => render_report(&features.handle, result, features),
        None => UNABLE_TO_ANALYZE.to_string(),
    }
}

/// Render the report for a scored account.
pub fn render_report(handle: &str, result: &ScoreResult, features: &AccountFeatures) -> String {
    let mut lines = Vec::with_capacity(5);

    lines.push(format!("@{}", handle.trim_start_matches('@')));
    lines.push(format!(
        "Trust: {} ({:.1}/{:.0})",
        result.tier(),
        result.trust_score,
        SCORE_REFERENCE_MAX
    ));
    lines.push(format!(
        "Age: {}d | Followers: {} | Following: {}",
        format_count(features.account_age_days),
        format_count(features.followers_count),
        format_count(features.following_count),
    ));

    if let Some(line) = factor_line("Positives:", &result.positive_factors) {
        lines.push(line);
    }
    if let Some(line) = factor_line("Risks:", &result.risk_factors) {
        lines.push(line);
    }

    let report = lines.join("\n");
    if report.chars().count() > MAX_REPORT_CHARS {
        // Leave room for the "..." truncate_chars appends
        truncate_chars(&report, MAX_REPORT_CHARS - 3)
    } else {
        report
    }
}

fn factor_line(label: &str, factors: &[String]) -> Option<String> {
    if factors.is_empty() {
        return None;
    }
    let shown: Vec<&str> = factors
        .iter()
        .take(MAX_FACTORS_PER_LINE)
        .map(String::as_str)
        .collect();
    Some(format!("{label} {}", shown.join(", ")))
}
