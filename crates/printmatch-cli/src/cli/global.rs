//! Flags shared by every subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// `-v` info, `-vv` per-file match decisions, `-vvv` trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colours. Also honours `NO_COLOR`.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read settings from this TOML file instead of the default location.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are written to stdout.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Whether errors should print their full cause chain.
    pub fn shows_causes(&self) -> bool {
        self.verbose > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Coloured, with symbols.
    Human,
    /// Uncoloured text for pipes and logs.
    Plain,
    /// One JSON document per command.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` setting. Anything unrecognised is `Auto`.
    pub fn from_config(value: &str) -> Self {
        <Self as ValueEnum>::from_str(value, true).unwrap_or_default()
    }

    /// Pick the format to use: an explicit flag first, then the setting,
    /// then terminal detection.
    pub fn resolve(self, configured: &str, stdout_is_tty: bool) -> Self {
        let requested = match self {
            Self::Auto => Self::from_config(configured),
            explicit => explicit,
        };
        match requested {
            Self::Auto if stdout_is_tty => Self::Human,
            Self::Auto => Self::Plain,
            concrete => concrete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_values_are_case_insensitive() {
        assert_eq!(OutputFormat::from_config("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("fancy"), OutputFormat::Auto);
    }

    #[test]
    fn explicit_flag_wins() {
        assert_eq!(OutputFormat::Plain.resolve("json", true), OutputFormat::Plain);
    }

    #[test]
    fn auto_follows_the_terminal() {
        assert_eq!(OutputFormat::Auto.resolve("auto", true), OutputFormat::Human);
        assert_eq!(OutputFormat::Auto.resolve("auto", false), OutputFormat::Plain);
        assert_eq!(OutputFormat::Auto.resolve("json", true), OutputFormat::Json);
    }
}
