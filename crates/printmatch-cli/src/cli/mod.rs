//! Command-line grammar. Handlers in `commands` receive these structs
//! already validated by clap (score ranges, code counts, required flags).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name    = "printmatch",
    bin_name = "printmatch",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "SKU codec and print-file auto-assignment",
    long_about = "printmatch encodes and decodes structured SKUs, suggests which \
                  uploaded print files belong to which product variants, and \
                  applies approved assignments.",
    after_help = "EXAMPLES:\n\
        \x20 printmatch encode 11K001 UTS 01 02\n\
        \x20 printmatch decode 11K001-UTS-01-01_print.png\n\
        \x20 printmatch suggest 11K001 --catalog catalog.toml --files ./print-files\n\
        \x20 printmatch apply 11K001 11K001-UTS-01-01_print.png --yes",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a SKU from its parts.
    #[command(
        visible_alias = "e",
        about = "Encode a SKU",
        after_help = "EXAMPLES:\n\
            \x20 printmatch encode 11K001 UTS\n\
            \x20 printmatch encode 11K001 UTS 01 02 03"
    )]
    Encode(EncodeArgs),

    /// Extract SKU prefixes from file names.
    #[command(
        visible_alias = "d",
        about = "Decode file names",
        after_help = "EXAMPLES:\n\
            \x20 printmatch decode 11K001-UTS-01-01_print.png\n\
            \x20 printmatch decode *.png --output-format json"
    )]
    Decode(DecodeArgs),

    /// Rank print files against an artwork's variants.
    #[command(
        visible_alias = "s",
        about = "Suggest print files for variants",
        after_help = "EXAMPLES:\n\
            \x20 printmatch suggest 11K001\n\
            \x20 printmatch suggest 11K001 --sku 11K001-UTS-01-01-02\n\
            \x20 printmatch suggest 11K001 --min-score 90 --output-format json"
    )]
    Suggest(SuggestArgs),

    /// Assign approved print files to every variant they cover.
    #[command(
        about = "Apply approved print files",
        after_help = "EXAMPLES:\n\
            \x20 printmatch apply 11K001 11K001-UTS-01-01_print.png\n\
            \x20 printmatch apply 11K001 --min-score 100 --yes\n\
            \x20 printmatch apply 11K001 3f2b8c1e-7d4a-5b6c-9e0f-1a2b3c4d5e6f --dry-run"
    )]
    Apply(ApplyArgs),

    /// Manage the printmatch configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 printmatch config get catalog.path\n\
            \x20 printmatch config list\n\
            \x20 printmatch config path"
    )]
    Config(ConfigCommands),
}

// ── encode / decode ───────────────────────────────────────────────────────────

/// Arguments for `printmatch encode`.
#[derive(Debug, Args)]
pub struct EncodeArgs {
    #[arg(value_name = "ARTWORK", help = "Artwork code, e.g. 11K001")]
    pub artwork: String,

    #[arg(value_name = "PRODUCT_TYPE", help = "Product type code, e.g. UTS")]
    pub product_type: String,

    /// Variant codes in hierarchy order.
    #[arg(value_name = "CODES", num_args = 0..=3, help = "Up to three two-digit variant codes")]
    pub codes: Vec<String>,
}

/// Arguments for `printmatch decode`.
#[derive(Debug, Args)]
pub struct DecodeArgs {
    #[arg(value_name = "FILE_NAME", required = true, help = "File names to decode")]
    pub file_names: Vec<String>,
}

// ── suggest / apply ───────────────────────────────────────────────────────────

/// Where the catalog and print files come from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Catalog file (overrides `catalog.path`).
    #[arg(long = "catalog", value_name = "FILE", help = "Catalog TOML file")]
    pub catalog: Option<PathBuf>,

    /// Print-file root (overrides `files.root`).
    #[arg(
        long = "files",
        value_name = "DIR",
        help = "Directory holding <ARTWORK>/ print-file folders"
    )]
    pub files_root: Option<PathBuf>,
}

/// Arguments for `printmatch suggest`.
#[derive(Debug, Args)]
pub struct SuggestArgs {
    #[arg(value_name = "ARTWORK", help = "Artwork code, e.g. 11K001")]
    pub artwork: String,

    /// Restrict targets to these variant SKUs (default: all of the artwork's variants).
    #[arg(long = "sku", value_name = "SKU", help = "Target variant SKU (repeatable)")]
    pub skus: Vec<String>,

    /// Hide candidates scoring below this value.
    #[arg(
        long = "min-score",
        value_name = "SCORE",
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Minimum confidence score to show"
    )]
    pub min_score: Option<u8>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `printmatch apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[arg(value_name = "ARTWORK", help = "Artwork code, e.g. 11K001")]
    pub artwork: String,

    /// Approved print files, by id or file name.
    #[arg(value_name = "FILE", help = "Approved print file id or name")]
    pub approved: Vec<String>,

    /// Approve every suggested file at or above this score.
    #[arg(
        long = "min-score",
        value_name = "SCORE",
        value_parser = clap::value_parser!(u8).range(0..=100),
        required_unless_present = "approved",
        help = "Approve all suggestions at or above this score"
    )]
    pub min_score: Option<u8>,

    /// Show the planned writes without performing them.
    #[arg(long = "dry-run", help = "Show what would be assigned")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Do not ask for confirmation")]
    pub yes: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

// ── config ────────────────────────────────────────────────────────────────────

/// `printmatch config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one configuration value.
    Get {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the default configuration file path.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_encode_command() {
        let cli = Cli::parse_from(["printmatch", "encode", "11K001", "UTS", "01", "02"]);
        let Commands::Encode(args) = cli.command else {
            panic!("expected Encode command");
        };
        assert_eq!(args.codes, vec!["01", "02"]);
    }

    #[test]
    fn encode_rejects_four_codes() {
        let result = Cli::try_parse_from([
            "printmatch", "encode", "11K001", "UTS", "01", "02", "03", "04",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn apply_needs_files_or_threshold() {
        assert!(Cli::try_parse_from(["printmatch", "apply", "11K001"]).is_err());
        assert!(Cli::try_parse_from(["printmatch", "apply", "11K001", "--min-score", "90"]).is_ok());
    }

    #[test]
    fn min_score_is_bounded() {
        let result = Cli::try_parse_from(["printmatch", "suggest", "11K001", "--min-score", "101"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["printmatch", "--quiet", "--verbose", "config", "path"]);
        assert!(result.is_err());
    }
}
