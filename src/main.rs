use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::time::Duration;
use tracing::{info, warn};

use trustcheck::config::{Config, RunMode};
use trustcheck::output::{report, terminal};
use trustcheck::pipeline::cycle::{self, CycleOutcome};
use trustcheck::pipeline::trigger::{ProcessedSet, TriggerMatcher};
use trustcheck::scoring::{engine, features};
use trustcheck::trust::trusted_set::{HttpListSource, TrustedSet};
use trustcheck::x::client::XClient;
use trustcheck::x::traits::{DryRunPlatform, Platform};

/// trustcheck: account trust assessments for X, delivered as replies.
///
/// Watches for replies containing the trigger phrase and answers with a short
/// trust report on the author of the post being replied to.
#[derive(Parser)]
#[command(name = "trustcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll for trigger replies and answer them until interrupted
    Run {
        /// Score and log replies without posting them
        #[arg(long)]
        dry_run: bool,

        /// Seconds between polling cycles (overrides TRUSTCHECK_POLL_SECS)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Run a single polling cycle and exit
    Once {
        /// Score and log the reply without posting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Assess a specific account and print the breakdown
    Check {
        /// The handle to check (e.g. @someone)
        handle: String,
    },

    /// Load and list the trusted-account allow-list
    Trusted,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trustcheck=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { dry_run, interval } => {
            let mut config = Config::load()?;
            if dry_run {
                config.run_mode = RunMode::DryRun;
            }
            if let Some(secs) = interval {
                if secs == 0 {
                    anyhow::bail!("--interval must be at least 1 second");
                }
                config.poll_interval = Duration::from_secs(secs);
            }
            config.require_reply()?;

            let platform = create_platform(&config)?;
            let trusted = load_trusted(&config).await?;
            let matcher = TriggerMatcher::new(&config.trigger_phrase);

            // Ctrl-C flips the flag; the loop checks it between cycles only
            let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupt received, stopping after the current cycle");
                    let _ = shutdown_tx.send(true);
                }
            });

            println!(
                "Watching for \"{}\" every {}s{}...",
                config.trigger_phrase,
                config.poll_interval.as_secs(),
                if config.run_mode == RunMode::DryRun {
                    " (dry run)"
                } else {
                    ""
                }
            );

            let replies = cycle::run_loop(
                platform.as_ref(),
                &matcher,
                &trusted,
                config.poll_interval,
                shutdown_rx,
            )
            .await;

            println!("\n{}", "Stopped.".bold());
            println!("  Replies posted: {replies}");
        }

        Commands::Once { dry_run } => {
            let mut config = Config::load()?;
            if dry_run {
                config.run_mode = RunMode::DryRun;
            }
            config.require_reply()?;

            let platform = create_platform(&config)?;
            let trusted = load_trusted(&config).await?;
            let matcher = TriggerMatcher::new(&config.trigger_phrase);
            let mut processed = ProcessedSet::new();

            let outcome = cycle::run_cycle(
                platform.as_ref(),
                &matcher,
                &trusted,
                &mut processed,
                Utc::now(),
            )
            .await;

            display_outcome(&outcome);
        }

        Commands::Check { handle } => {
            let config = Config::load()?;
            config.require_search()?;

            // Strip leading @ if present
            let handle = handle.strip_prefix('@').unwrap_or(&handle);

            println!("Checking account: @{handle}...");

            let client = XClient::new(&config.api_url, &config.bearer_token, "")?;
            let trusted = load_trusted(&config).await?;

            let analysis = client.lookup_user(handle).await?.and_then(|user| {
                let profile = features::ProfileMetadata::from(&user);
                features::extract_features(&profile, &trusted, Utc::now())
            });

            match analysis {
                Some(account) => {
                    let result = engine::score_account(&account);
                    terminal::display_assessment(&account, &result);

                    let reply = report::render(Some((&account, &result)));
                    println!("\n  {}", "Reply preview:".dimmed());
                    for line in reply.lines() {
                        println!("    {line}");
                    }
                }
                None => {
                    println!("{}", report::render(None).yellow());
                }
            }
        }

        Commands::Trusted => {
            let config = Config::load()?;
            let trusted = load_trusted(&config).await?;
            terminal::display_trusted_set(&trusted);
        }
    }

    Ok(())
}

/// Build the platform client for the configured run mode.
fn create_platform(config: &Config) -> Result<Box<dyn Platform>> {
    let client = XClient::new(
        &config.api_url,
        &config.bearer_token,
        &config.user_access_token,
    )?;

    let platform: Box<dyn Platform> = match config.run_mode {
        RunMode::Live => Box::new(client),
        RunMode::DryRun => Box::new(DryRunPlatform::new(client)),
    };
    Ok(platform)
}

/// Load the trusted set. A missing URL or a failed fetch both yield an
/// empty set; the bot still runs, just without trust-network bonuses.
async fn load_trusted(config: &Config) -> Result<TrustedSet> {
    if config.trusted_list_url.is_empty() {
        warn!("TRUSTED_LIST_URL not set, no accounts will get the trust-network bonus");
        return Ok(TrustedSet::default());
    }

    let source = HttpListSource::new(&config.trusted_list_url)?;
    Ok(TrustedSet::load(&source).await)
}

fn display_outcome(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::SearchFailed => {
            println!("{} search failed, see log for details", "Warning:".yellow());
        }
        CycleOutcome::NoMatch { candidates } => {
            println!("No new trigger replies ({candidates} candidates checked).");
        }
        CycleOutcome::Skipped { post_id } => {
            println!("Matched post {post_id}, but the account could not be analyzed.");
        }
        CycleOutcome::Replied {
            post_id,
            handle,
            tier,
            reply_id,
        } => {
            println!(
                "Replied to {post_id} about @{handle}: {} (reply {reply_id})",
                tier.as_str().bold()
            );
        }
        CycleOutcome::ReplyFailed { post_id, handle } => {
            println!(
                "{} assessed @{handle} but could not reply to {post_id}",
                "Warning:".yellow()
            );
        }
    }
}
