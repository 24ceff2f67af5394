//! Everything written to stdout goes through [`OutputManager`].
//!
//! Quiet mode drops decoration but never JSON documents, so
//! `-q --output-format json` still yields machine-readable results.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const SUCCESS: &str = "\u{2713}";
const WARNING: &str = "\u{26a0}";
const INFO: &str = "\u{2139}";
const DETAIL_INDENT: &str = "      ";

pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = args
            .output_format
            .resolve(&config.output.format, io::stdout().is_terminal());
        let no_color =
            args.no_color || config.output.no_color || resolved_format != OutputFormat::Human;

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg.to_owned())
    }

    /// Pretty-printed JSON document.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(SUCCESS, msg, Style::new().green())
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(WARNING, msg, Style::new().yellow())
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(INFO, msg, Style::new().blue())
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.line(self.paint(text, Style::new().cyan().bold()))
    }

    /// Indented secondary line under a candidate or plan entry.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        self.line(format!("{DETAIL_INDENT}{}", self.paint(text, Style::new().dimmed())))
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    fn marked(&self, symbol: &str, msg: &str, style: Style) -> io::Result<()> {
        let line = format!(
            "{} {}",
            self.paint(symbol, style.bold()),
            self.paint(msg, style)
        );
        self.line(line)
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            text.style(style).to_string()
        }
    }

    fn line(&self, text: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&text)
    }
}
