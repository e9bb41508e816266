//! `shelfcheck config` and config-file resolution for other commands.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use shelfcheck_recon::ShelfConfig;

use crate::exit_codes::{EXIT_CONFIG_INVALID, EXIT_ERROR, EXIT_USAGE};
use crate::CliError;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate a config file without running an analysis
    #[command(after_help = "\
Examples:
  shelfcheck config check shelfcheck.toml")]
    Check {
        /// Path to the TOML config file
        path: PathBuf,
    },

    /// Print the built-in defaults as TOML
    #[command(after_help = "\
Examples:
  shelfcheck config default > ~/.config/shelfcheck/config.toml")]
    Default,
}

pub fn cmd_config(cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Check { path } => cmd_config_check(&path),
        ConfigCommands::Default => cmd_config_default(),
    }
}

fn cmd_config_check(path: &Path) -> Result<(), CliError> {
    let config = read_config(path, EXIT_CONFIG_INVALID)?;
    eprintln!(
        "valid: tiers {}/{}/{}, phantom above {}, {} narrative candidate(s)",
        config.tiers.a,
        config.tiers.b,
        config.tiers.c,
        config.phantom.min_stock,
        config.narrative.candidates.len(),
    );
    Ok(())
}

fn cmd_config_default() -> Result<(), CliError> {
    let text = ShelfConfig::default()
        .to_toml()
        .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
    print!("{text}");
    Ok(())
}

/// Overrides the directory searched for `config.toml`.
pub const CONFIG_DIR_ENV: &str = "SHELFCHECK_CONFIG_DIR";

/// Default location: `$SHELFCHECK_CONFIG_DIR/config.toml`, else
/// `<config dir>/shelfcheck/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    config_path_from(std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from))
}

fn config_path_from(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) if !dir.as_os_str().is_empty() => Some(dir.join("config.toml")),
        _ => dirs::config_dir().map(|d| d.join("shelfcheck").join("config.toml")),
    }
}

/// Explicit `--config`, else the default location when it exists, else
/// built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<ShelfConfig, CliError> {
    if let Some(path) = explicit {
        return read_config(path, EXIT_USAGE);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            log::debug!("using config {}", path.display());
            read_config(&path, EXIT_USAGE)
        }
        _ => Ok(ShelfConfig::default()),
    }
}

fn read_config(path: &Path, invalid_code: u8) -> Result<ShelfConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::args(format!("cannot read config {}: {e}", path.display()))
    })?;

    ShelfConfig::from_toml(&text).map_err(|e| {
        CliError::new(invalid_code, format!("{}: {e}", path.display()))
            .with_hint("run `shelfcheck config default` to see every key with its default")
    })
}
