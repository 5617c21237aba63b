//! MiniMart CLI - catalog browsing and flow exercising tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog (page 1, default order)
//! mm-cli browse
//!
//! # Filter, search, sort, paginate
//! mm-cli browse -c beverage -s coca --sort price-asc -p 2
//!
//! # Browse without a backend (built-in seed list)
//! mm-cli browse --offline
//!
//! # Show the built-in seed catalog
//! mm-cli seed
//!
//! # List branches
//! mm-cli branches
//!
//! # Exercise a checkout end to end
//! mm-cli checkout -u linh --product 1 --product 4 -n "Linh Tran" -a "12 Market Street" --phone "0123 456 789"
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};

use minimart_storefront::backend::InMemoryBackend;
use minimart_storefront::catalog::listing::SortMode;
use minimart_storefront::config::StorefrontConfig;
use minimart_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "mm-cli")]
#[command(author, version, about = "MiniMart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog with the listing pipeline
    Browse {
        /// Category filter (household, electronics, food, beverage)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order
        #[arg(long, value_enum, default_value_t = SortArg::Default)]
        sort: SortArg,

        /// Page number (1-based, 8 items per page)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Skip the backend and browse the built-in seed list
        #[arg(long)]
        offline: bool,
    },
    /// Show the built-in seed catalog
    Seed,
    /// List the store branches
    Branches {
        /// Use the in-memory backend instead of the configured one
        #[arg(long)]
        offline: bool,
    },
    /// Exercise a full checkout against the backend
    Checkout {
        /// Username to log in with
        #[arg(short, long)]
        username: String,

        /// Product IDs to order (repeatable)
        #[arg(long = "product", required = true)]
        products: Vec<i32>,

        /// Recipient name
        #[arg(short = 'n', long)]
        name: String,

        /// Shipping address
        #[arg(short, long)]
        address: String,

        /// Contact phone
        #[arg(long)]
        phone: String,

        /// Use the in-memory backend instead of the configured one
        #[arg(long)]
        offline: bool,
    },
}

/// Sort order for `browse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    /// Catalog order
    Default,
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Alphabetical
    Name,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Default => Self::Default,
            SortArg::PriceAsc => Self::PriceAscending,
            SortArg::PriceDesc => Self::PriceDescending,
            SortArg::Name => Self::NameAscending,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Browse {
            category,
            search,
            sort,
            page,
            offline,
        } => {
            let options = commands::browse::Options {
                category,
                search,
                sort: sort.into(),
                page,
            };
            if offline {
                commands::browse::run(offline_app(), options).await?;
            } else {
                commands::browse::run(configured_app()?, options).await?;
            }
        }
        Commands::Seed => commands::seed::run(),
        Commands::Branches { offline } => {
            if offline {
                commands::branches::run(offline_app()).await?;
            } else {
                commands::branches::run(configured_app()?).await?;
            }
        }
        Commands::Checkout {
            username,
            products,
            name,
            address,
            phone,
            offline,
        } => {
            let options = commands::checkout::Options {
                username,
                products,
                name,
                address,
                phone,
            };
            if offline {
                commands::checkout::run(offline_app(), options).await?;
            } else {
                commands::checkout::run(configured_app()?, options).await?;
            }
        }
    }
    Ok(())
}

fn configured_app() -> Result<AppState, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    Ok(AppState::new(config)?)
}

fn offline_app() -> AppState<InMemoryBackend> {
    AppState::with_backend(StorefrontConfig::default(), InMemoryBackend::new())
}
