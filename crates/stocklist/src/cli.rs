//! Command-line surface of `stocklist`: flags shared by every command,
//! the subcommand tree and the value enums clap parses into.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Entry ────────────────────────────────────────────────────────────

/// stocklist -- browse product listings and manufacturer availability
#[derive(Debug, Parser)]
#[command(
    name = "stocklist",
    version,
    about = "Browse product listings and stock availability from the command line",
    long_about = "Fetches jackets, shirts and accessories from the catalog API,\n\
        groups them alphabetically, and joins each product with its\n\
        manufacturer's availability.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Shared flags ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "STOCKLIST_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Catalog API base URL (overrides profile)
    #[arg(long, env = "STOCKLIST_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "STOCKLIST_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// More log output on stderr; repeat for more (-vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print results and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "STOCKLIST_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: from profile, else 30]
    #[arg(long, env = "STOCKLIST_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Rendering ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for reading in a terminal
    #[default]
    Table,
    /// Indented JSON
    Json,
    /// JSON on a single line
    JsonCompact,
    /// YAML
    Yaml,
    /// One record per line, for shell pipelines
    Plain,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    /// Color even when piped
    Always,
    /// No ANSI escapes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products of a category, optionally for one letter
    #[command(alias = "ls", alias = "p")]
    Products(ProductsArgs),

    /// Show the full detail of one product
    Show(ShowArgs),

    /// List the alphabet filter for a category
    Letters(LettersArgs),

    /// List accessory manufacturers
    #[command(alias = "mfr")]
    Manufacturers,

    /// Show one manufacturer's availability table
    #[command(alias = "avail")]
    Availability(AvailabilityArgs),

    /// Inspect or edit the config file and its profiles
    Config(ConfigArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

// ── Catalog ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Category: jackets, shirts, accessories [default: from config]
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Only products whose name starts with this letter
    #[arg(long, short = 'l')]
    pub letter: Option<char>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Product ID (case-insensitive)
    pub id: String,
}

#[derive(Debug, Args)]
pub struct LettersArgs {
    /// Category: jackets, shirts, accessories [default: from config]
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct AvailabilityArgs {
    /// Manufacturer name, as listed by `stocklist manufacturers`
    pub manufacturer: String,
}

// ── Config ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file, prompting for each value
    Init {
        /// Accept every default without prompting
        #[arg(long)]
        defaults: bool,
    },

    /// Print the configuration as loaded, env overrides included
    Show,

    /// Print the config file location
    Path,

    /// Set a profile value
    Set {
        /// Config key: api_url, timeout, insecure, ca_cert
        key: String,

        /// New value
        value: String,
    },

    /// Name every profile, marking the default
    Profiles,

    /// Make a profile the default
    #[command(alias = "use")]
    SetDefault {
        /// Existing profile name
        name: String,
    },
}

// ── Completions ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
