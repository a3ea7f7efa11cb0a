//! Shopifake CLI - storefront resolution diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # Which tenant does a host resolve to?
//! shopifake resolve acme.shopifake.com --base-domain shopifake.com
//!
//! # Render the storefront config for a site config or draft
//! shopifake build --config site-config.json --site-name "Acme"
//! shopifake build --draft draft.json
//! shopifake build --draft draft.json --as-site-config
//!
//! # Look a slug up against the sites service and report the resulting mode
//! shopifake lookup acme --api-url http://localhost:8080
//! ```
//!
//! # Commands
//!
//! - `resolve` - Resolve a host to a tenant slug
//! - `build` - Build a storefront config from JSON
//! - `lookup` - Fetch a site and show the mode it resolves to

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopifake")]
#[command(author, version, about = "Shopifake storefront resolution tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a host to a tenant slug
    Resolve {
        /// Host as sent in the `Host` header, port included or not
        host: String,

        /// Base domain (defaults to `SHOPIFAKE_BASE_DOMAIN`)
        #[arg(short, long)]
        base_domain: Option<String>,
    },
    /// Build a storefront config from a site config or draft
    Build {
        /// Site config JSON file (`-` for stdin)
        #[arg(short, long, conflicts_with = "draft")]
        config: Option<PathBuf>,

        /// Site draft JSON file (`-` for stdin)
        #[arg(short, long)]
        draft: Option<PathBuf>,

        /// Site name used when the config has none
        #[arg(short = 'n', long)]
        site_name: Option<String>,

        /// Print the site config a draft would be saved as, instead of rendering it
        #[arg(long, requires = "draft")]
        as_site_config: bool,
    },
    /// Fetch a site by slug and show the mode it resolves to
    Lookup {
        /// Tenant slug
        slug: String,

        /// Sites service base URL (defaults to `SITES_API_URL`)
        #[arg(short, long)]
        api_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output = match cli.command {
        Commands::Resolve { host, base_domain } => {
            commands::resolve::run(&host, base_domain.as_deref())?
        }
        Commands::Build {
            config,
            draft,
            site_name,
            as_site_config,
        } => {
            if as_site_config {
                commands::build::site_config(draft.as_deref())?
            } else {
                commands::build::run(config.as_deref(), draft.as_deref(), site_name.as_deref())?
            }
        }
        Commands::Lookup { slug, api_url } => {
            commands::lookup::run(&slug, api_url.as_deref()).await?
        }
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
