//! CLI argument definitions for coinpulse.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list` | Top assets by market cap, optionally filtered |
//! | `detail` | Descriptive record for one asset |
//! | `browse` | Listing followed by several detail views in one session |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--currency` | `COINPULSE_CURRENCY` or `brl` | Listing currency |
//! | `--base-url` | `COINPULSE_BASE_URL` | Upstream or proxy base URL |
//! | `--proxied` | `false` | Base URL is a proxy that sets its own user-agent |
//! | `--timeout-ms` | `COINPULSE_TIMEOUT_MS` or `10000` | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! coinpulse list --search eth
//! coinpulse detail bitcoin --currency usd
//! coinpulse browse bitcoin ethereum --format json --pretty
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Cached, rate-limited crypto market data from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "coinpulse",
    author,
    version,
    about = "Cached, rate-limited crypto market data"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Listing currency (usd, brl).
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Upstream API or proxy base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Treat the base URL as a proxy; no user-agent header is sent.
    #[arg(long, global = true, default_value_t = false)]
    pub proxied: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Top assets by market capitalization.
    List(ListArgs),
    /// Detail record for one asset id (e.g. `bitcoin`).
    Detail(DetailArgs),
    /// Listing, then each detail in turn through one shared session.
    Browse(BrowseArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive filter on name or symbol.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct DetailArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    #[arg(required = true)]
    pub ids: Vec<String>,
}
