//! # deb-index CLI (`debidx`)
//!
//! ## Usage
//!
//! ```bash
//! debidx --config ./config/debidx.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `debidx init` | Create the SQLite database and run schema migrations |
//! | `debidx index` | Scan the repository and index every artifact |
//! | `debidx inspect <file.deb>` | Print the parsed control fields of one package |
//! | `debidx search "<query>"` | Search indexed fields |
//! | `debidx get <uinfo>` | Rebuild an artifact record from its stored document |
//! | `debidx fields` | List the document schema |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use deb_index::{config, get, ingest, inspect, logging, migrate, search};

/// Index Debian packages by their control metadata.
///
/// Commands that touch the database read a TOML configuration file. See
/// `config/debidx.example.toml` for a full example.
#[derive(Parser)]
#[command(name = "debidx", version, about = "Index Debian packages by their control metadata")]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/debidx.toml")]
    config: PathBuf,

    /// Enable debug logging on stderr. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Idempotent.
    Init,

    /// Scan the repository and index every matching artifact.
    ///
    /// Packages whose control block cannot be read are reported and
    /// skipped; the rest of the batch is indexed.
    Index {
        /// Extract and count without writing to the database.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of artifacts to process.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the control fields of a single package file.
    ///
    /// Uses `extract.max_control_bytes` from the config file when it
    /// exists, the built-in limit otherwise.
    Inspect {
        /// Path to a `.deb` file.
        path: PathBuf,
    },

    /// Search indexed fields (case-insensitive substring match).
    Search {
        query: String,

        /// Restrict to one field: a control field name (`Depends`) or a
        /// storage key (`deb_depends`).
        #[arg(long)]
        field: Option<String>,

        /// Maximum number of results to return.
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },

    /// Rebuild an artifact record from its stored document and print it as JSON.
    Get {
        /// Artifact identifier (repository-relative path).
        uinfo: String,
    },

    /// List document fields with their storage keys and policies.
    Fields,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // Commands that don't require config
    match &cli.command {
        Commands::Fields => {
            inspect::run_fields()?;
            return Ok(());
        }
        Commands::Inspect { path } => {
            let locator = inspect::inspect_locator(&cli.config)?;
            inspect::run_inspect(&locator, path)?;
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Index { dry_run, limit } => {
            ingest::run_index(&cfg, dry_run, limit).await?;
        }
        Commands::Search {
            query,
            field,
            limit,
        } => {
            search::run_search(&cfg, &query, field.as_deref(), limit).await?;
        }
        Commands::Get { uinfo } => {
            get::run_get(&cfg, &uinfo).await?;
        }
        Commands::Inspect { .. } | Commands::Fields => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
