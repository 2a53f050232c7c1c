//! Bookstore CLI - Browse the catalog and manage a session from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session is kept in the profile directory)
//! bookstore login -e user@example.com -p password
//!
//! # Who am I signed in as?
//! bookstore whoami
//!
//! # Browse the catalog
//! bookstore books list --q gatsby --sort price-asc
//! bookstore books show 1
//!
//! # Price a cart: two copies of book 1, one of book 3
//! bookstore cart quote 1:2 3
//! bookstore cart quote --shipping-fee 0 1:2 3
//!
//! # Track an order (requires a session)
//! bookstore order show 1234567
//!
//! bookstore logout
//! ```
//!
//! # Environment Variables
//!
//! - `BOOKSTORE_API_URL` - Storefront base URL (default: <http://127.0.0.1:3001>)
//! - `BOOKSTORE_PROFILE` - Directory holding the session (default: `.bookstore`)
//! - `BOOKSTORE_PASSWORD` - Password for `login`/`register` when `-p` is omitted
//! - `BOOKSTORE_SHIPPING_FEE` - Flat fee used by `cart quote`; match the
//!   storefront's `STOREFRONT_SHIPPING_FEE` (default: 4.99)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bookstore_core::{BookId, CatalogQuery, OrderId, Price, SortOrder};
use bookstore_client::ShippingPolicy;
use clap::{Parser, Subcommand, ValueEnum};
use secrecy::SecretString;
use url::Url;

mod commands;

use commands::Context;
use commands::cart::CartLine;

#[derive(Parser)]
#[command(name = "bookstore")]
#[command(author, version, about = "Bookstore command-line front end")]
struct Cli {
    /// Storefront base URL
    #[arg(long, env = "BOOKSTORE_API_URL", default_value = "http://127.0.0.1:3001")]
    api_url: Url,

    /// Directory the session is stored in
    #[arg(long, env = "BOOKSTORE_PROFILE", default_value = ".bookstore")]
    profile_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session in the profile
    Login {
        /// Account email (matched exactly)
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "BOOKSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account, then sign in with it
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "BOOKSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Browse the catalog
    Books {
        #[command(subcommand)]
        action: BooksAction,
    },
    /// Price a prospective cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Track orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum BooksAction {
    /// List books, optionally filtered and sorted
    List {
        /// Case-insensitive search over title and author
        #[arg(long)]
        q: Option<String>,

        /// Category name, or "All"
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order
        #[arg(short, long, value_enum, default_value_t = SortArg::Relevance)]
        sort: SortArg,
    },
    /// Show one book
    Show {
        /// Book ID
        id: BookId,
    },
    /// List catalog categories
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show subtotal, shipping and total for a set of books
    Quote {
        /// Lines as `<book-id>[:<quantity>]`
        #[arg(required = true)]
        lines: Vec<CartLine>,

        /// Flat shipping fee for a non-empty cart
        #[arg(long, env = "BOOKSTORE_SHIPPING_FEE", default_value = "4.99")]
        shipping_fee: Price,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Show an order and its delivery progress
    Show {
        /// Order ID
        id: OrderId,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Relevance,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Relevance => Self::Relevance,
            SortArg::PriceAsc => Self::PriceAsc,
            SortArg::PriceDesc => Self::PriceDesc,
            SortArg::TitleAsc => Self::TitleAsc,
            SortArg::TitleDesc => Self::TitleDesc,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Quiet by default; RUST_LOG=bookstore_client=debug shows gateway calls
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::new(cli.api_url, &cli.profile_dir);

    match cli.command {
        Commands::Login { email, password } => {
            let password = SecretString::from(password);
            commands::auth::login(&ctx, &email, &password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let password = SecretString::from(password);
            commands::auth::register(&ctx, &name, &email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Books { action } => match action {
            BooksAction::List { q, category, sort } => {
                let query = CatalogQuery {
                    search: q,
                    category,
                    sort: sort.into(),
                };
                commands::books::list(&ctx, &query).await?;
            }
            BooksAction::Show { id } => commands::books::show(&ctx, id).await?,
            BooksAction::Categories => commands::books::categories(&ctx).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Quote {
                lines,
                shipping_fee,
            } => {
                let policy = ShippingPolicy::flat(shipping_fee);
                commands::cart::quote(&ctx, &lines, &policy).await?;
            }
        },
        Commands::Order { action } => match action {
            OrderAction::Show { id } => commands::orders::show(&ctx, id).await?,
        },
    }
    Ok(())
}
