//! Handlers for the `config` subcommands.

use std::path::PathBuf;

use crate::cli::ConfigAction;
use crate::config::DeedboardConfig;
use crate::error::{Error, Result};

/// Dispatch a `config` subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force).map(|_| ()),
    }
}

/// Print the config file path in use.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = DeedboardConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `deedboard config init` to create it)");
    }
    Ok(())
}

/// Print the effective configuration.
pub fn cmd_config_show(config_path: Option<&str>) -> Result<()> {
    let config = DeedboardConfig::load(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Print one configuration value.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = DeedboardConfig::load(config_path)?;
    let value = lookup(&config, key)?;
    println!("{}", format_toml_value(&value));
    Ok(())
}

/// Write the default configuration, returning where it went.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => DeedboardConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = DeedboardConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(path)
}

/// Value at a dotted key such as `server.port`.
pub fn lookup(config: &DeedboardConfig, key: &str) -> Result<toml::Value> {
    let mut current = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    for part in key.split('.') {
        current = match current {
            toml::Value::Table(mut table) => table.remove(part),
            _ => None,
        }
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    }
    Ok(current)
}

/// Strings print bare; everything else prints as TOML.
fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
