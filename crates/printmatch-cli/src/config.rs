//! Settings for the binary.
//!
//! Later sources override earlier ones: built-in defaults, the settings file
//! (`--config`, else [`AppConfig::config_path`] when it exists), then
//! `PRINTMATCH__SECTION__KEY` environment variables. Command-line flags such
//! as `--catalog` are applied by the commands themselves.

use std::path::PathBuf;

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "PRINTMATCH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub files: FilesConfig,
    pub store: StoreConfig,
    pub output: OutputConfig,
    pub apply: ApplyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog TOML describing dimensions, product types and variants.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Directory holding one folder of print files per artwork.
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Where applied assignments are saved. Unset keeps them in memory only.
    pub assignments: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyConfig {
    /// Ask before writing unless `--yes` is given.
    pub confirm: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                path: PathBuf::from("catalog.toml"),
            },
            files: FilesConfig {
                root: PathBuf::from("print-files"),
            },
            store: StoreConfig {
                assignments: Some(PathBuf::from("assignments.json")),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            apply: ApplyConfig { confirm: true },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the default location is read if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Platform config directory (`~/.config/printmatch/config.toml` on
    /// Linux), or `.printmatch.toml` when no home directory is known.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "printmatch", "printmatch")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".printmatch.toml"))
    }
}
