//! CLI administration tool for vocab-cards.
//!
//! Provides commands for inspecting the database, listing and deleting
//! cards, and viewing statistics without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # List the second page of cards, 20 per page
//! cargo run --bin admin -- card list --page 2 --page-size 20
//!
//! # Delete a card without confirmation
//! cargo run --bin admin -- card delete 42 -y
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `USE_DB`, `DATABASE_URL`, `DB_MAX_CONNECTIONS`, ...

use vocab_cards::application::services::CardService;
use vocab_cards::config;
use vocab_cards::domain::repositories::CardOrder;
use vocab_cards::infrastructure::persistence::{PoolSettings, SqliteUnitOfWork, database};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing vocab-cards.
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
    /// Manage cards
    Card {
        #[command(subcommand)]
        action: CardAction,
    },

    /// Manage relevance levels
    Relevance {
        #[command(subcommand)]
        action: RelevanceAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Card subcommands.
#[derive(Subcommand)]
enum CardAction {
    /// List cards page by page
    List {
        /// Page number (1-indexed)
        #[arg(long, default_value_t = 1)]
        page: i64,

        /// Cards per page
        #[arg(long, default_value_t = 25)]
        page_size: i64,

        /// Order by `id` or `german`
        #[arg(long, default_value_t = CardOrder::Id)]
        order: CardOrder,
    },

    /// Delete a card
    Delete {
        /// Card ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Relevance subcommands.
#[derive(Subcommand)]
enum RelevanceAction {
    /// List all relevance levels
    List,
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = database::connect(&PoolSettings::from(&config))
        .await
        .context("Failed to connect to database")?;
    database::migrate(&pool)
        .await
        .context("Failed to run migrations")?;

    let service = CardService::new(Arc::new(SqliteUnitOfWork::new(pool.clone())));

    match cli.command {
        Commands::Card { action } => handle_card_action(action, &service).await?,
        Commands::Relevance { action } => handle_relevance_action(action, &service).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Dispatches card commands.
async fn handle_card_action(
    action: CardAction,
    service: &CardService<SqliteUnitOfWork>,
) -> Result<()> {
    match action {
        CardAction::List {
            page,
            page_size,
            order,
        } => list_cards(service, page, page_size, order).await,
        CardAction::Delete { id, yes } => delete_card(service, id, yes).await,
    }
}

/// Prints one page of cards.
///
/// # Output Format
///
/// ```text
/// 📋 Cards (page 1 of 3, 57 total)
///
///   ID    Type         German                    Italian                   Relevance    Played
///   ───────────────────────────────────────────────────────────────────────────────────────────
///   1     VERB         haben                     avere                     A1           3/4
/// ```
async fn list_cards(
    service: &CardService<SqliteUnitOfWork>,
    page: i64,
    page_size: i64,
    order: CardOrder,
) -> Result<()> {
    let result = service
        .read_cards(page, page_size, order)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list cards: {}", e))?;

    println!(
        "{} (page {} of {}, {} total)",
        "📋 Cards".bright_blue().bold(),
        result.current_page,
        result.count_pages,
        result.count_records
    );
    println!();

    if result.records.is_empty() {
        println!("{}", "  No cards on this page".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<12} {:<25} {:<25} {:<12} {}",
        "ID".bright_white().bold(),
        "Type".bright_white().bold(),
        "German".bright_white().bold(),
        "Italian".bright_white().bold(),
        "Relevance".bright_white().bold(),
        "Played".bright_white().bold()
    );
    println!("  {}", "─".repeat(91).bright_black());

    for card in &result.records {
        println!(
            "  {:<5} {:<12} {:<25} {:<25} {:<12} {}/{}",
            card.id.unwrap_or_default().to_string().bright_black(),
            card.word_type.as_str(),
            card.german.cyan(),
            card.italian.cyan(),
            card.relevance.description,
            card.statistics.correct_answers,
            card.statistics.times_played
        );
    }

    println!();
    if result.has_next_page {
        println!(
            "  Next page: {} card list --page {} --page-size {}",
            "cargo run --bin admin --".bright_cyan(),
            result.current_page + 1,
            result.page_size
        );
        println!();
    }

    Ok(())
}

/// Deletes a card after showing it, asking for confirmation unless `--yes`.
async fn delete_card(
    service: &CardService<SqliteUnitOfWork>,
    id: i64,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑  Delete Card".bright_blue().bold());
    println!();

    let card = service
        .read_card(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  German:  {}", card.german.cyan());
    println!("  Italian: {}", card.italian.cyan());
    println!("  Tags:    {}", card.tag_values().join(", ").bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this card?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_card(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete card: {}", e))?;

    println!("{}", "✅ Card deleted".green().bold());
    println!();

    Ok(())
}

/// Dispatches relevance commands.
async fn handle_relevance_action(
    action: RelevanceAction,
    service: &CardService<SqliteUnitOfWork>,
) -> Result<()> {
    match action {
        RelevanceAction::List => {
            println!("{}", "📋 Relevance Levels".bright_blue().bold());
            println!();

            let levels = service
                .list_relevance_levels()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list relevance levels: {}", e))?;

            if levels.is_empty() {
                println!("{}", "  No relevance levels found".yellow());
                return Ok(());
            }

            for level in &levels {
                println!(
                    "  {:<5} {}",
                    level.id.unwrap_or_default().to_string().bright_black(),
                    level.description.cyan()
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Displays card, relevance and tag counts plus answer totals.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let cards_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM card")
        .fetch_one(pool)
        .await?;

    let relevance_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM relevance")
        .fetch_one(pool)
        .await?;

    let tags_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tag")
        .fetch_one(pool)
        .await?;

    let (played, correct): (i64, i64) = sqlx::query_as(
        "SELECT COALESCE(SUM(times_played), 0), COALESCE(SUM(correct_answers), 0) FROM card",
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Cards:            {}",
        cards_count.to_string().bright_green().bold()
    );
    println!(
        "  Relevance levels: {}",
        relevance_count.to_string().bright_green().bold()
    );
    println!(
        "  Tags:             {}",
        tags_count.to_string().bright_green().bold()
    );
    println!(
        "  Answers:          {} ({} correct)",
        played.to_string().bright_green().bold(),
        correct.to_string().green()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
                    .fetch_one(pool)
                    .await?;

            println!("  SQLite:     {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
