//! CLI administration tool for linkmint.
//!
//! Inspects links and clicks and resets rate limit windows without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links with click counts
//! cargo run --bin admin -- links
//!
//! # Check database connection and row counts
//! cargo run --bin admin -- db check
//!
//! # Clear a client's link creation window
//! cargo run --bin admin -- rate-limit reset 203.0.113.9
//! ```
//!
//! # Environment Variables
//!
//! The same variables as the server: `DATABASE_URL` (or `DB_*`) and
//! `REDIS_URL` (or `REDIS_*`) for `rate-limit` commands.

use linkmint::application::services::RateLimiter;
use linkmint::config::{Config, RateLimitBackend};
use linkmint::domain::repositories::LinkRepository;
use linkmint::infrastructure::persistence::PgLinkRepository;
use linkmint::infrastructure::rate_limit::RedisRateLimitStore;
use linkmint::server::connect_database;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing linkmint.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// List links with click counts, newest first
    Links {
        /// Show at most this many links
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Rate limit operations
    RateLimit {
        #[command(subcommand)]
        action: RateLimitAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show row counts
    Check,
}

/// Rate limit subcommands.
#[derive(Subcommand)]
enum RateLimitAction {
    /// Clear the link creation window of a client
    Reset {
        /// Client key (the client IP address, or "unknown")
        client: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Links { limit } => {
            let pool = connect_database(&config).await?;
            list_links(&pool, limit).await?;
        }
        Commands::Db { action } => {
            let pool = connect_database(&config).await?;
            handle_db_action(action, &pool).await?;
        }
        Commands::RateLimit { action } => handle_rate_limit_action(action, &config).await?,
    }

    Ok(())
}

/// Prints the link table with click counts.
async fn list_links(pool: &PgPool, limit: Option<usize>) -> Result<()> {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let links = repo
        .list_with_click_counts()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    if links.is_empty() {
        println!("  {}", "No links yet".bright_black());
        println!();
        return Ok(());
    }

    println!(
        "  {:<10} {:>7} {:<17} {}",
        "CODE".bold(),
        "CLICKS".bold(),
        "LAST CLICK".bold(),
        "URL".bold()
    );

    for summary in links.iter().take(limit.unwrap_or(usize::MAX)) {
        let last_clicked = summary
            .last_clicked
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<10} {:>7} {:<17} {}",
            summary.link.short_code.cyan(),
            summary.click_count.to_string().bright_green(),
            last_clicked.bright_black(),
            summary.link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!();

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;

            let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
                .fetch_one(pool)
                .await?;

            println!(
                "  Links:  {}",
                links_count.to_string().bright_green().bold()
            );
            println!(
                "  Clicks: {}",
                clicks_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Handles rate limit commands against the shared Redis store.
async fn handle_rate_limit_action(action: RateLimitAction, config: &Config) -> Result<()> {
    match action {
        RateLimitAction::Reset { client, yes } => {
            if config.rate_limit_backend == RateLimitBackend::Memory {
                println!(
                    "{}",
                    "ℹ RATE_LIMIT_BACKEND=memory keeps windows inside each server process; \
                     there is no shared window to reset. Restart the server to clear them."
                        .yellow()
                );
                return Ok(());
            }

            let redis_url = config
                .shared_rate_limit_url()
                .context("REDIS_URL or REDIS_HOST must be set")?;

            let store = RedisRateLimitStore::connect(redis_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to Redis: {}", e))?;

            let limiter = RateLimiter::new(
                Arc::new(store),
                config.rate_limit_max,
                Duration::from_secs(config.rate_limit_window_secs),
            );

            println!("{}", "⏱  Reset Rate Limit".bright_blue().bold());
            println!();
            println!("  Client: {}", client.cyan());
            println!("  Key:    {}", RateLimiter::key_for(&client).bright_black());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Clear this client's window?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            limiter
                .reset(&client)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to reset window: {}", e))?;

            println!();
            println!("{}", "✅ Window cleared".green().bold());
            println!();
        }
    }

    Ok(())
}
