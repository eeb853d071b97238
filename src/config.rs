use std::env;
use std::time::Duration;

use anyhow::Result;

/// Default trigger phrase that summons the bot.
pub const DEFAULT_TRIGGER_PHRASE: &str = "riddle me this";

/// Default seconds between polling cycles.
pub const DEFAULT_POLL_SECS: u64 = 60;

/// Whether replies are actually posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Post replies for real (default)
    Live,
    /// Search and score, but only log the replies
    DryRun,
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// App-only bearer token; used for search and user lookup
    pub bearer_token: String,
    /// OAuth 2.0 user-context token with tweet.write; used to post replies
    pub user_access_token: String,
    /// X API base URL (defaults to https://api.x.com)
    pub api_url: String,
    /// Phrase that must appear in a reply to trigger an assessment
    pub trigger_phrase: String,
    /// Plain-text trusted-handle list. Empty means no trust-network bonus.
    pub trusted_list_url: String,
    pub poll_interval: Duration,
    pub run_mode: RunMode,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything except the tokens has a default; the require_* checks
    /// below report missing tokens for the commands that need them.
    pub fn load() -> Result<Self> {
        let run_mode = match env::var("TRUSTCHECK_MODE").as_deref() {
            Ok("dry-run") | Ok("dry_run") | Ok("dryrun") => RunMode::DryRun,
            // "live" or unset both default to live
            _ => RunMode::Live,
        };

        let poll_secs = match env::var("TRUSTCHECK_POLL_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!("TRUSTCHECK_POLL_SECS must be a whole number of seconds: {e}")
            })?,
            Err(_) => DEFAULT_POLL_SECS,
        };
        if poll_secs == 0 {
            anyhow::bail!("TRUSTCHECK_POLL_SECS must be at least 1");
        }

        let trigger_phrase = env::var("TRUSTCHECK_TRIGGER")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TRIGGER_PHRASE.to_string());

        Ok(Self {
            bearer_token: env::var("X_BEARER_TOKEN").unwrap_or_default(),
            user_access_token: env::var("X_USER_ACCESS_TOKEN").unwrap_or_default(),
            api_url: env::var("X_API_URL")
                .unwrap_or_else(|_| crate::x::client::DEFAULT_API_URL.to_string()),
            trigger_phrase,
            trusted_list_url: env::var("TRUSTED_LIST_URL").unwrap_or_default(),
            poll_interval: Duration::from_secs(poll_secs),
            run_mode,
        })
    }

    /// Check that the bearer token is configured.
    /// Call this before anything that searches or looks up accounts.
    pub fn require_search(&self) -> Result<()> {
        if self.bearer_token.is_empty() {
            anyhow::bail!(
                "X_BEARER_TOKEN not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that replies can be posted in the current run mode.
    /// Dry runs never post, so they don't need the user token.
    pub fn require_reply(&self) -> Result<()> {
        self.require_search()?;
        if self.run_mode == RunMode::Live && self.user_access_token.is_empty() {
            anyhow::bail!(
                "X_USER_ACCESS_TOKEN not set. Posting replies requires a user-context token.\n\
                 Add it to your .env file, or run with --dry-run."
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(bearer: &str, user: &str, run_mode: RunMode) -> Config {
        Config {
            bearer_token: bearer.to_string(),
            user_access_token: user.to_string(),
            api_url: crate::x::client::DEFAULT_API_URL.to_string(),
            trigger_phrase: DEFAULT_TRIGGER_PHRASE.to_string(),
            trusted_list_url: String::new(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            run_mode,
        }
    }

    #[test]
    fn test_require_search_needs_bearer() {
        assert!(config("", "", RunMode::Live).require_search().is_err());
        assert!(config("b", "", RunMode::Live).require_search().is_ok());
    }

    #[test]
    fn test_dry_run_does_not_need_user_token() {
        assert!(config("b", "", RunMode::Live).require_reply().is_err());
        assert!(config("b", "", RunMode::DryRun).require_reply().is_ok());
        assert!(config("b", "u", RunMode::Live).require_reply().is_ok());
    }
}
