//! `printmatch config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config_value(config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current configuration:")?;
            let rendered = toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
                message: "settings cannot be shown as TOML".into(),
                source: Some(Box::new(e)),
            })?;
            output.print(&rendered)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "catalog.path" => Ok(config.catalog.path.display().to_string()),
        "files.root" => Ok(config.files.root.display().to_string()),
        "store.assignments" => Ok(config
            .store
            .assignments
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "apply.confirm" => Ok(config.apply.confirm.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}
