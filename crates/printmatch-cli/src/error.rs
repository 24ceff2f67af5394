//! CLI errors: what went wrong, what to try next, and which exit code to
//! return. Core errors are wrapped and keep their own suggestions.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use printmatch_core::error::{ErrorCategory as CoreCategory, PrintMatchError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Arguments parsed but make no sense together, or a prompt failed.
    #[error("{message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// A configured or given path does not exist.
    #[error("{what} not found at {}", path.display())]
    PathNotFound { what: &'static str, path: PathBuf },

    /// An approved file could not be identified among the artwork's files.
    #[error("No print file '{reference}' for artwork {artwork}")]
    UnknownPrintFile { artwork: String, reference: String },

    #[error("No print files selected for artwork {artwork}")]
    NothingToApply { artwork: String },

    /// Some writes of an apply batch failed; the rest were kept.
    #[error("{failed} of {attempted} assignments failed: {first_error}")]
    ApplyIncomplete {
        failed: usize,
        attempted: usize,
        first_error: String,
    },

    /// Settings file unreadable, unparsable, or an unknown key was asked for.
    #[error("Bad configuration: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error(transparent)]
    Core(#[from] PrintMatchError),

    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Apply cancelled at the prompt")]
    Cancelled,
}

/// How an error is presented and which exit status it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            message: "writing output failed".into(),
            source,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["See 'printmatch help <command>' for usage".into()],
            Self::PathNotFound { what, path } => vec![
                format!("No {} at '{}'", what.to_lowercase(), path.display()),
                "Pass the path explicitly (--catalog / --files)".into(),
                "Or set it once: printmatch config path shows where the config lives".into(),
            ],
            Self::UnknownPrintFile { artwork, .. } => vec![
                format!("List candidates first: printmatch suggest {artwork}"),
                "Approve files by the id or file name shown there".into(),
            ],
            Self::NothingToApply { artwork } => vec![
                "No suggestion reached the requested --min-score".into(),
                format!("Review scores with: printmatch suggest {artwork}"),
            ],
            Self::ApplyIncomplete { .. } => vec![
                "The other assignments were written".into(),
                "Re-running the same apply is safe and retries the failed ones".into(),
            ],
            Self::ConfigError { .. } => vec![
                "Check the file shown by 'printmatch config path'".into(),
                "Keys: catalog.path, files.root, store.assignments, output.no_color, output.format, apply.confirm".into(),
                "Environment overrides use PRINTMATCH__SECTION__KEY".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec!["Check that the paths involved are writable".into()],
            Self::Cancelled => vec!["Nothing was written".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::NothingToApply { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::PathNotFound { .. } | Self::UnknownPrintFile { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::ApplyIncomplete { .. } | Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Unavailable | CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
        }
    }

    /// Message, optional cause chain and suggestions, ready for stderr.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };
        let red = Style::new().red();

        let mut out = format!(
            "\n{} {}\n  {}\n",
            paint("\u{2717}", red.bold()),
            paint("Error:", red.bold()),
            paint(&self.to_string(), red)
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!(
                    "  {} {}\n",
                    paint("caused by:", Style::new().dimmed()),
                    err
                ));
                cause = err.source();
            }
        }

        let hints = self.suggestions();
        if !hints.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Suggestions:", Style::new().yellow().bold())
            ));
            for hint in &hints {
                out.push_str(&format!("  {hint}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Run again with -v for the underlying cause.", Style::new().dimmed())
            ));
        }
        out
    }

    /// Emit one tracing event at a severity matching the category.
    pub fn log(&self) {
        let cause = self.source().map(|e| e.to_string());
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category = ?self.category(), cause = cause.as_deref(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), cause = cause.as_deref(), "{self}")
            }
        }
    }
}

/// Attach a short description to a failed I/O call.
pub trait IoContext<T> {
    fn io_context(self, message: &str) -> CliResult<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context(self, message: &str) -> CliResult<T> {
        self.map_err(|source| CliError::IoError {
            message: message.to_owned(),
            source,
        })
    }
}
