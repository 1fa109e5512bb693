//! # fo-cli
//!
//! Command-line front end for a local file-object store.
//!
//! Every subcommand maps onto one connector or handle operation:
//! - `fo stat` / `fo ls` — metadata snapshots and directory listings
//! - `fo mkdir` — create a directory chain under the root
//! - `fo put` — copy an external file in
//! - `fo cat` / `fo write` / `fo truncate` — work on one open handle
//!
//! The root comes from `--data-dir` or a connection options file
//! (`--config`), e.g.:
//!
//! ```toml
//! name = "local"
//! connector = "localfs"
//!
//! [items]
//! data_dir = "/var/lib/fo"
//! confinement = "strict"
//! ```

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fo_connector_localfs::Connector;

/// Inspect and populate a local file-object store.
#[derive(Parser)]
#[command(name = "fo", version, about)]
struct Cli {
    /// Connection options file (TOML).
    #[arg(long, conflicts_with = "data_dir")]
    config: Option<PathBuf>,

    /// Root directory of the store.
    #[arg(long)]
    data_dir: Option<String>,

    /// Resolve symlinks and refuse paths whose real location is outside the root.
    #[arg(long)]
    strict: bool,

    /// Log every operation at debug level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show metadata for one path.
    Stat {
        path: String,
        /// Print JSON instead of a table row.
        #[arg(long)]
        json: bool,
    },
    /// List a directory.
    Ls {
        path: String,
        /// Maximum number of entries (0 lists everything).
        #[arg(long, default_value = "0")]
        limit: i64,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Create a directory and any missing parents.
    Mkdir {
        path: String,
        /// Octal permission bits.
        #[arg(long, default_value = "755", value_parser = commands::parse_mode)]
        mode: u32,
    },
    /// Copy an external file into the store, replacing existing content.
    Put {
        /// Source file (outside the store).
        src: String,
        /// Destination path under the root.
        dst: String,
    },
    /// Print a file's content to stdout.
    Cat { path: String },
    /// Write text into a file, creating it if needed.
    Write {
        path: String,
        text: String,
        /// Byte offset. Without it the text overwrites from offset 0.
        #[arg(long)]
        offset: Option<u64>,
    },
    /// Resize a file.
    Truncate { path: String, size: u64 },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they don't interfere with `fo cat` output.
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("fo_connector_localfs={}", level).parse()?)
                .add_directive(format!("fo={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let copts =
        commands::connection_options(cli.config.as_deref(), cli.data_dir.as_deref(), cli.strict)?;
    let conn = Connector::connect(&copts)?;

    let mut out = std::io::stdout().lock();

    match &cli.command {
        Commands::Stat { path, json } => commands::meta::stat(&conn, path, *json, &mut out),
        Commands::Ls { path, limit, json } => {
            commands::meta::ls(&conn, path, *limit, *json, &mut out)
        }
        Commands::Mkdir { path, mode } => commands::object::mkdir(&conn, path, *mode, &mut out),
        Commands::Put { src, dst } => commands::put::execute(&conn, src, dst, &mut out),
        Commands::Cat { path } => commands::object::cat(&conn, path, &mut out),
        Commands::Write { path, text, offset } => {
            commands::object::write(&conn, path, text, *offset, &mut out)
        }
        Commands::Truncate { path, size } => {
            commands::object::truncate(&conn, path, *size, &mut out)
        }
    }
}
