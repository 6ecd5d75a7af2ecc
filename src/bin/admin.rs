//! CLI administration tool for short-url.
//!
//! Inspects and maintains links and visits directly in the database,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List the newest links
//! cargo run --bin admin -- links list --page 1 --page-size 20
//!
//! # Delete a link and its visits
//! cargo run --bin admin -- links delete 42
//!
//! # Show the visit log of a link
//! cargo run --bin admin -- visits 42
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL`, `POSTGRES_URI`
//! or the `DB_*` components).

use short_url::application::services::link_service::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use short_url::config;
use short_url::domain::repositories::{LinkRepository, VisitRepository};
use short_url::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use short_url::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-url.
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
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show the visit log of a link
    Visits {
        /// Link ID
        id: i64,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        #[arg(short, long, default_value_t = DEFAULT_PAGE)]
        page: i64,

        #[arg(short = 's', long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: i64,
    },

    /// Delete a link together with its visits
    Delete {
        /// Link ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
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

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool).await?,
        Commands::Visits { id } => list_visits(&pool, id).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

fn link_repository(pool: &PgPool) -> PgLinkRepository {
    PgLinkRepository::new(Arc::new(pool.clone()))
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = link_repository(pool);

    match action {
        LinkAction::List { page, page_size } => list_links(&repo, page, page_size).await?,
        LinkAction::Delete { id, yes } => delete_link(&repo, id, yes).await?,
    }

    Ok(())
}

/// Lists one page of links.
///
/// # Output Format
///
/// ```text
/// Links (page 1)
///
///   ID    Code    Visits   Created            URL
///   ──────────────────────────────────────────────────────────────
///   12    abc123  4        2024-06-01 10:30   https://example.com
/// ```
async fn list_links(repo: &PgLinkRepository, page: i64, page_size: i64) -> Result<()> {
    let page = page.max(1);
    let page_size = if page_size > 0 { page_size } else { DEFAULT_PAGE_SIZE };

    println!("{}", format!("Links (page {page})").bright_blue().bold());
    println!();

    let links = repo
        .list(page, page_size)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<7} {:<8} {:<18} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let code = if link.is_expired() {
            link.code.red()
        } else {
            link.code.cyan()
        };

        println!(
            "  {:<5} {:<7} {:<8} {:<18} {}",
            link.id.to_string().bright_black(),
            code,
            link.visits_count.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(repo: &PgLinkRepository, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete link".bright_blue().bold());
    println!();

    let link = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    println!("  Code:   {}", link.code.cyan());
    println!("  URL:    {}", link.url);
    println!("  Visits: {}", link.visits_count.to_string().bright_green());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link and all of its visits?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "Link deleted".green().bold());
    } else {
        println!("{}", "Link was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Prints the visit log of a link, newest first.
async fn list_visits(pool: &PgPool, id: i64) -> Result<()> {
    let link = link_repository(pool)
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    let visits = PgVisitRepository::new(Arc::new(pool.clone()))
        .list_for_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list visits: {}", e))?;

    println!(
        "{} {}",
        "Visits for".bright_blue().bold(),
        link.url.bright_white()
    );
    println!();

    if visits.is_empty() {
        println!("{}", "  No visits recorded".yellow());
        return Ok(());
    }

    for visit in &visits {
        let referrer = if visit.referrer.is_empty() {
            "-"
        } else {
            visit.referrer.as_str()
        };

        println!(
            "  {}  {:<39} {}  {}",
            visit
                .created_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            visit.ip_address.cyan(),
            referrer,
            visit.user_agent.bright_black()
        );
    }

    println!();
    println!("  Total: {}", visits.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays link and visit totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count = link_repository(pool)
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    let visits_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits: {}",
        visits_count.to_string().bright_green().bold()
    );
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
