//! CLI administration tool for url-redirector.
//!
//! Inspects and manages short URLs without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the short code an identifier maps to, and back
//! cargo run --bin admin -- encode 1000000
//! cargo run --bin admin -- decode 0004c92
//!
//! # Per-code statistics and recent clicks
//! cargo run --bin admin -- stats 0004c92
//!
//! # Delete a short URL (asks for confirmation)
//! cargo run --bin admin -- delete 0004c92
//!
//! # Overall counts / connectivity
//! cargo run --bin admin -- summary
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `url_redirector::config`). `encode` and `decode`
//! need none.

use url_redirector::application::services::{LinkService, ResilientCache, StatsService};
use url_redirector::config::{Config, load_from_env};
use url_redirector::infrastructure::persistence::{PgClickRepository, PgUrlRepository};
use url_redirector::server::connect_cache;
use url_redirector::utils::base62;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

const RECENT_CLICKS: i64 = 10;

/// CLI tool for managing url-redirector.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the short code for a store identifier
    Encode { id: u64 },

    /// Print the store identifier behind a short code
    Decode { code: String },

    /// Show statistics and recent clicks for a short code
    Stats { code: String },

    /// Delete a short URL and evict it from the cache
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show overall URL and click counts
    Summary,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { id } => encode(id),
        Commands::Decode { code } => decode(&code),
        command => {
            let config = load_from_env()?;
            let pool = PgPool::connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;

            match command {
                Commands::Stats { code } => show_stats(&pool, &config, &code).await,
                Commands::Delete { code, yes } => delete(&pool, &config, &code, yes).await,
                Commands::Summary => show_summary(&pool).await,
                Commands::Db { action } => handle_db_action(action, &pool).await,
                Commands::Encode { .. } | Commands::Decode { .. } => Ok(()),
            }
        }
    }
}

fn encode(id: u64) -> Result<()> {
    let code = base62::encode(id)?;
    println!("{} -> {}", id.to_string().bright_white(), code.bright_green().bold());
    Ok(())
}

fn decode(code: &str) -> Result<()> {
    let id = base62::decode(code)?;
    println!("{} -> {}", code.bright_white(), id.to_string().bright_green().bold());

    if !base62::is_valid_code(code) {
        println!(
            "{}",
            format!(
                "  note: not a canonical {}-character code, the server will answer 404",
                base62::CODE_LENGTH
            )
            .yellow()
        );
    }
    Ok(())
}

/// Displays the counter, metadata and most recent clicks for a code.
async fn show_stats(pool: &PgPool, config: &Config, code: &str) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let service = StatsService::new(
        Arc::new(PgUrlRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
        config.timeouts(),
    );

    let record = service
        .get_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", format!("Statistics for {}", code).bright_blue().bold());
    println!();
    println!("  Long URL:   {}", record.long_url.cyan());
    println!(
        "  Created:    {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    match record.expires_at {
        Some(expires_at) if record.is_expired_at(chrono::Utc::now()) => println!(
            "  Expires:    {} {}",
            expires_at.format("%Y-%m-%d %H:%M:%S"),
            "(EXPIRED)".red()
        ),
        Some(expires_at) => println!("  Expires:    {}", expires_at.format("%Y-%m-%d %H:%M:%S")),
        None => println!("  Expires:    {}", "never".bright_black()),
    }
    println!(
        "  Clicks:     {}",
        record.click_count.to_string().bright_green().bold()
    );

    let page = service
        .list_clicks(code, 0, RECENT_CLICKS)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if page.items.is_empty() {
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  {:<20} {:<16} {}",
        "Clicked".bright_white().bold(),
        "IP".bright_white().bold(),
        "User agent".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for click in &page.items {
        println!(
            "  {:<20} {:<16} {}",
            click.clicked_at.format("%Y-%m-%d %H:%M:%S"),
            click.ip_address.as_deref().unwrap_or("-"),
            click.user_agent.as_deref().unwrap_or("-").bright_black()
        );
    }
    println!();
    println!(
        "  Showing {} of {} logged clicks",
        page.items.len(),
        page.total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a short URL after confirmation, invalidating its cache entry.
async fn delete(pool: &PgPool, config: &Config, code: &str, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete short URL {}? Click history is kept.", code))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let cache = ResilientCache::new(
        connect_cache(config).await,
        Duration::from_secs(config.cache_ttl_seconds),
        config.timeouts(),
    );
    let service = LinkService::new(
        Arc::new(PgUrlRepository::new(Arc::new(pool.clone()))),
        cache,
        config.timeouts(),
        config.base_url.clone(),
    );

    service
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete {}: {}", code, e))?;

    println!("{}", format!("Deleted {}", code).green().bold());
    Ok(())
}

/// Displays overall URL and click counts.
async fn show_summary(pool: &PgPool) -> Result<()> {
    println!("{}", "Summary".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE short_code IS NOT NULL")
        .fetch_one(pool)
        .await?;

    let expired_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE expires_at < now()")
            .fetch_one(pool)
            .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
        .fetch_one(pool)
        .await?;

    println!("  URLs:    {}", urls_count.to_string().bright_green().bold());
    println!("  Expired: {}", expired_count.to_string().yellow());
    println!("  Clicks:  {}", clicks_count.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
