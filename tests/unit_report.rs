// Unit tests for reply report rendering.
//
// The report has a fixed line layout and must always fit in a single post;
// these check line order, optional factor lines, factor caps, and the
// unable-to-analyze fallback.

use trustcheck::output::report::{
    render, render_report, MAX_FACTORS_PER_LINE, MAX_REPORT_CHARS, UNABLE_TO_ANALYZE,
};
use trustcheck::scoring::bio::extract_bio_signals;
use trustcheck::scoring::engine::{score_account, ScoreResult};
use trustcheck::scoring::features::{follower_ratio, AccountFeatures};

fn features() -> AccountFeatures {
    AccountFeatures {
        handle: "builder".to_string(),
        account_age_days: 400,
        follower_following_ratio: follower_ratio(20_000, 50),
        bio: extract_bio_signals(Some("web3 builder, check my link http://x.co")),
        is_verified: true,
        followers_count: 20_000,
        following_count: 50,
        tweet_count: 900,
        trust_network_score: 0,
    }
}

fn factors(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix} {i}")).collect()
}

#[test]
fn full_report_layout() {
    let f = features();
    let result = score_account(&f);
    let report = render(Some((&f, &result)));

    assert_eq!(
        report,
        "@builder\n\
         Trust: CAUTION (4.0/7)\n\
         Age: 400d | Followers: 20,000 | Following: 50\n\
         Positives: Established account, High follower ratio\n\
         Risks: No verified trust connections"
    );
}

#[test]
fn render_matches_render_report() {
    let f = features();
    let result = score_account(&f);
    assert_eq!(
        render(Some((&f, &result))),
        render_report(&f.handle, &result, &f)
    );
}

#[test]
fn handle_with_at_is_not_doubled() {
    let f = features();
    let result = score_account(&f);
    let report = render_report("@builder", &result, &f);
    assert!(report.starts_with("@builder\n"));
}

#[test]
fn none_renders_fixed_text() {
    assert_eq!(render(None), UNABLE_TO_ANALYZE);
    assert_eq!(render(None), render(None));
}

#[test]
fn factor_lines_are_omitted_when_empty() {
    let f = features();
    let result = ScoreResult {
        trust_score: 5.5,
        positive_factors: vec![],
        risk_factors: vec![],
    };
    let report = render_report(&f.handle, &result, &f);
    assert_eq!(report.lines().count(), 3);
    assert!(report.contains("TRUSTWORTHY (5.5/7)"));
}

#[test]
fn only_risk_line_when_no_positives() {
    let f = features();
    let result = ScoreResult {
        trust_score: 0.0,
        positive_factors: vec![],
        risk_factors: vec!["Very new account".to_string()],
    };
    let report = render_report(&f.handle, &result, &f);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "Trust: HIGH_RISK (0.0/7)");
    assert_eq!(lines[3], "Risks: Very new account");
}

#[test]
fn at_most_two_factors_per_line() {
    let f = features();
    let result = ScoreResult {
        trust_score: 2.0,
        positive_factors: factors("good", 5),
        risk_factors: factors("bad", 4),
    };
    let report = render_report(&f.handle, &result, &f);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3], "Positives: good 1, good 2");
    assert_eq!(lines[4], "Risks: bad 1, bad 2");
    for line in &lines[3..] {
        let listed = line.split_once(": ").unwrap().1.split(", ").count();
        assert!(listed <= MAX_FACTORS_PER_LINE);
    }
}

#[test]
fn score_above_reference_is_shown_unclamped() {
    let f = features();
    let result = ScoreResult {
        trust_score: 8.0,
        positive_factors: vec![],
        risk_factors: vec![],
    };
    let report = render_report(&f.handle, &result, &f);
    assert!(report.contains("(8.0/7)"));
}

#[test]
fn report_always_fits_in_a_post() {
    let mut f = features();
    f.handle = "h".repeat(300);
    f.followers_count = u64::MAX;
    f.following_count = u64::MAX;
    f.account_age_days = u64::MAX;
    let result = ScoreResult {
        trust_score: 1.0,
        positive_factors: vec!["p".repeat(200), "q".repeat(200)],
        risk_factors: vec!["r".repeat(200)],
    };
    let report = render_report(&f.handle, &result, &f);
    assert!(report.chars().count() <= MAX_REPORT_CHARS);
    assert!(report.lines().count() <= 5);
}
