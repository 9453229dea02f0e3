//! CLI administration tool for short-urls.
//!
//! Provides commands for provisioning users, issuing bearer tokens, searching
//! links and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user and print its bearer token
//! cargo run --bin admin -- user create --name alice
//!
//! # Re-issue a token for an existing user
//! cargo run --bin admin -- user token 0b5f2c1e-...
//!
//! # Sign a token for a SEED_USERS entry of a memory-backed server (no database)
//! cargo run --bin admin -- user token alice --offline
//!
//! # Search links
//! cargo run --bin admin -- links search --filter example --sort clicks --sort-dir desc
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`/`DB_USER`/...): PostgreSQL connection
//! - `AUTH_SIGNING_SECRET`: key used to sign bearer tokens (user commands)

use short_urls::application::services::AuthService;
use short_urls::config::{Config, mask_connection_string};
use short_urls::domain::entities::User;
use short_urls::domain::repositories::{
    LinkRepository, SearchInput, SearchParams, UserRepository,
};
use short_urls::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing short-urls.
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
    /// Manage users and their bearer tokens
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a user and print a bearer token for it
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// User id (random UUID if not provided)
        #[arg(long)]
        id: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Issue a bearer token for an existing user
    Token {
        /// User id
        id: String,

        /// Sign without looking the user up (for users seeded into memory storage)
        #[arg(long)]
        offline: bool,
    },
}

/// Link inspection subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// Search all stored links, deleted ones included
    Search {
        #[arg(long)]
        page: Option<i64>,

        #[arg(long)]
        per_page: Option<i64>,

        /// `created_at` or `clicks`
        #[arg(long)]
        sort: Option<String>,

        /// `asc` or `desc`
        #[arg(long)]
        sort_dir: Option<String>,

        /// Case-insensitive substring of the original URL
        #[arg(short, long)]
        filter: Option<String>,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::User {
        action: UserAction::Token { id, offline: true },
    } = &cli.command
    {
        println!("{}", "🔑 Bearer Token".bright_blue().bold());
        println!("  User: {} (not verified)", id.cyan());
        print_token(&auth_service()?.issue_token(id));
        return Ok(());
    }

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Links { action } => handle_links_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn auth_service() -> Result<AuthService> {
    let secret =
        std::env::var("AUTH_SIGNING_SECRET").context("AUTH_SIGNING_SECRET must be set")?;
    anyhow::ensure!(!secret.is_empty(), "AUTH_SIGNING_SECRET must not be empty");
    Ok(AuthService::new(secret))
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = PgUserRepository::new(pool);
    let auth = auth_service()?;

    match action {
        UserAction::Create { name, id, yes } => create_user(&repo, &auth, name, id, yes).await,
        UserAction::Token { id, .. } => issue_token(&repo, &auth, &id).await,
    }
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for a display name (or use provided)
/// 2. Use the provided id or generate a UUID
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Store the user and print a signed bearer token
async fn create_user(
    repo: &PgUserRepository,
    auth: &AuthService,
    name: Option<String>,
    id: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Display name").interact_text()?,
    };

    let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());

    if repo
        .find_by_id(&id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .is_some()
    {
        anyhow::bail!("User '{}' already exists", id);
    }

    println!("{}", "User details:".bright_white().bold());
    println!("  Id:   {}", id.cyan());
    println!("  Name: {}", name.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = User::new(id, name, Utc::now());
    repo.insert(&user)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!("{}", "✅ User created successfully!".green().bold());
    print_token(&auth.issue_token(&user.id));

    Ok(())
}

/// Re-issues a bearer token for an existing user.
async fn issue_token(repo: &PgUserRepository, auth: &AuthService, id: &str) -> Result<()> {
    let user = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("User '{}' not found", id))?;

    println!("{}", "🔑 Bearer Token".bright_blue().bold());
    println!("  User: {} ({})", user.name.cyan(), user.id.bright_black());
    print_token(&auth.issue_token(&user.id));

    Ok(())
}

fn print_token(token: &str) {
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/urls",
        token.bright_yellow()
    );
    println!();
}

/// Dispatches link inspection commands.
async fn handle_links_action(action: LinksAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = PgLinkRepository::new(pool);

    match action {
        LinksAction::Search {
            page,
            per_page,
            sort,
            sort_dir,
            filter,
        } => {
            let params = SearchParams::new(SearchInput {
                page,
                per_page,
                sort,
                sort_dir,
                filter,
            });
            search_links(&repo, params).await
        }
    }
}

/// Prints one page of links with pagination metadata.
///
/// # Output Format
///
/// ```text
/// 🔎 Links
///
///   Code    Clicks  Created           Status   URL
///   ──────────────────────────────────────────────────────────────
///   aB3_x-  4       2025-03-01 10:00  ACTIVE   https://example.com
///
///   Page 1 of 1 (1 total)
/// ```
async fn search_links(repo: &PgLinkRepository, params: SearchParams) -> Result<()> {
    println!("{}", "🔎 Links".bright_blue().bold());
    println!();

    let result = repo
        .search(params)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to search links: {}", e))?;

    if result.items.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<7} {:<7} {:<17} {:<8} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &result.items {
        let status = if link.is_deleted() {
            "DELETED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<7} {:<7} {:<17} {:<8} {}",
            link.short_code().cyan(),
            link.clicks().to_string(),
            link.created_at()
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status,
            link.original_url()
        );
    }

    println!();
    println!(
        "  Page {} of {} ({} total)",
        result.current_page.to_string().bright_white().bold(),
        result.last_page.to_string().bright_white().bold(),
        result.total.to_string().bright_white().bold()
    );
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
        }
    }

    Ok(())
}
