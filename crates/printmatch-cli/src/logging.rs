//! Tracing subscriber setup. Only the binary installs a subscriber; the
//! library crates just emit events.
//!
//! Level: `--quiet` → error, default → warn, `-v` → info, `-vv` → debug,
//! `-vvv` → trace. A set `RUST_LOG` replaces the whole filter.

use std::io::{self, IsTerminal as _};

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events pass the default filter.
const OWN_TARGETS: [&str; 3] = ["printmatch", "printmatch_core", "printmatch_adapters"];

/// What the subscriber should look like for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    level: &'static str,
    json: bool,
    ansi: bool,
}

impl LogSettings {
    fn from_args(args: &GlobalArgs, stderr_is_tty: bool) -> Self {
        let level = match (args.quiet, args.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        };
        let json = args.output_format == OutputFormat::Json;
        Self {
            level,
            json,
            ansi: !json && !args.no_color && stderr_is_tty,
        }
    }

    fn directives(&self) -> String {
        OWN_TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber, writing to stderr.
///
/// JSON output mode switches log lines to JSON as well.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let settings = LogSettings::from_args(args, io::stderr().is_terminal());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directives()));

    let layer = if settings.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(settings.ansi)
            .with_writer(io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool, format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: false,
            config: None,
            output_format: format,
        }
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let level = |v, q| LogSettings::from_args(&args(v, q, OutputFormat::Auto), false).level;
        assert_eq!(level(0, true), "error");
        assert_eq!(level(0, false), "warn");
        assert_eq!(level(1, false), "info");
        assert_eq!(level(2, false), "debug");
        assert_eq!(level(7, false), "trace");
    }

    #[test]
    fn directives_cover_every_crate() {
        let settings = LogSettings::from_args(&args(2, false, OutputFormat::Auto), false);
        assert_eq!(
            settings.directives(),
            "printmatch=debug,printmatch_core=debug,printmatch_adapters=debug"
        );
    }

    #[test]
    fn json_mode_never_colours() {
        let settings = LogSettings::from_args(&args(0, false, OutputFormat::Json), true);
        assert!(settings.json);
        assert!(!settings.ansi);
    }

    #[test]
    fn terminal_gets_colour_unless_disabled() {
        assert!(LogSettings::from_args(&args(0, false, OutputFormat::Human), true).ansi);
        let mut no_color = args(0, false, OutputFormat::Human);
        no_color.no_color = true;
        assert!(!LogSettings::from_args(&no_color, true).ansi);
    }
}
