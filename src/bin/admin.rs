//! CLI administration tool for tinylink.
//!
//! Manages links, shows totals and performs database operations without going through
//! the HTTP API. Link creation uses the same registrar as the server, so codes are
//! validated and allocated identically.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin admin -- links list
//! cargo run --bin admin -- links create https://example.com --code promo24
//! cargo run --bin admin -- links delete promo24
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- db migrate
//! ```
//!
//! Reads the same environment variables as the server (`DATABASE_URL` or `DB_*`,
//! `BASE_URL`).

use tinylink::application::services::LinkService;
use tinylink::config::{self, Config};
use tinylink::domain::entities::Link;
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show link and click totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link
    Show { code: String },

    /// Create a short link
    Create {
        /// Target URL (http or https)
        url: String,

        /// Custom code, 6-8 alphanumeric characters
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Permanently delete a link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn link_service(pool: &PgPool, config: &Config) -> LinkService {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    LinkService::new(repo, config.base_url.clone())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let service = link_service(pool, config);

    match action {
        LinkAction::List => list_links(&service).await?,
        LinkAction::Show { code } => {
            let link = service
                .get_link(&code)
                .await
                .with_context(|| format!("Failed to load link '{code}'"))?;
            print_link(&service, &link);
        }
        LinkAction::Create { url, code } => {
            let link = service
                .create_link(Some(url), code)
                .await
                .context("Failed to create link")?;

            println!("{}", "Link created".green().bold());
            println!();
            print_link(&service, &link);
        }
        LinkAction::Delete { code, yes } => delete_link(&service, code, yes).await?,
    }

    Ok(())
}

/// Lists all links as a table.
///
/// ```text
///   Code      Clicks  Created           Target
///   ───────────────────────────────────────────────────────────
///   promo24   12      2025-01-15 10:30  https://example.com/sale
/// ```
async fn list_links(service: &LinkService) -> Result<()> {
    let links = service.list_links().await.context("Failed to list links")?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<7} {:<17} {}",
            link.code.cyan(),
            link.clicks,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());

    Ok(())
}

fn print_link(service: &LinkService, link: &Link) {
    let last_clicked = link
        .last_clicked
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:         {}", link.code.cyan());
    println!("  Short URL:    {}", service.short_url(&link.code).bright_yellow());
    println!("  Target:       {}", link.target_url);
    println!("  Clicks:       {}", link.clicks.to_string().bright_green());
    println!("  Last clicked: {}", last_clicked.bright_black());
    println!(
        "  Created:      {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, code: String, skip_confirm: bool) -> Result<()> {
    let link = service
        .get_link(&code)
        .await
        .with_context(|| format!("Failed to load link '{code}'"))?;

    print_link(service, &link);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? The code will become available again.")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(&code)
        .await
        .context("Failed to delete link")?;

    println!("{}", "Link deleted".green().bold());

    Ok(())
}

async fn handle_stats(pool: &PgPool, config: &Config) -> Result<()> {
    let totals = link_service(pool, config)
        .totals()
        .await
        .context("Failed to load totals")?;

    println!("{}", "Statistics".bright_blue().bold());
    println!();
    println!(
        "  Links:  {}",
        totals.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        totals.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
