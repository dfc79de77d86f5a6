//! Command-line arguments for the converter.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, RegistryKeying};

/// COLLADA converter command-line arguments.
///
/// CLI values override settings loaded from `converter.ron`.
#[derive(Parser, Debug)]
#[command(name = "collada-convert", about = "Resolve and deduplicate COLLADA materials")]
pub struct CliArgs {
    /// Scene description (RON) to convert.
    #[arg(long)]
    pub scene: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Registry keying: `per-material` or `legacy`.
    #[arg(long, value_parser = parse_keying)]
    pub registry_keying: Option<RegistryKeying>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_keying(name: &str) -> Result<RegistryKeying, String> {
    RegistryKeying::from_cli_name(name)
        .ok_or_else(|| format!("unknown registry keying '{name}', expected per-material or legacy"))
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(keying) = args.registry_keying {
            self.materials.registry_keying = keying;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "collada-convert",
            "--scene",
            "scene.ron",
            "--registry-keying",
            "legacy",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(
            config.materials.registry_keying,
            RegistryKeying::LegacyDefaultShortCircuit
        );
        // Non-overridden fields retain defaults
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs::parse_from(["collada-convert", "--scene", "scene.ron"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
        assert_eq!(args.scene, PathBuf::from("scene.ron"));
    }

    #[test]
    fn test_cli_rejects_unknown_keying() {
        let result = CliArgs::try_parse_from([
            "collada-convert",
            "--scene",
            "scene.ron",
            "--registry-keying",
            "sometimes",
        ]);
        assert!(result.is_err());
    }
}
