//! Configuration management CLI commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::cli::overrides::PlateOverrides;
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the configuration file path
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    #[command(flatten)]
    plates: PlateOverrides,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    plates: &'a crate::config::PlateConfig,
    ceilings: &'a crate::config::CeilingConfig,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_picklist: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            output_json(&config)
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.plates.is_empty() && self.theme.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --source-rows, --source-cols, \
                 --dest-rows, --dest-cols, --source-ceiling, --dest-ceiling, or --theme",
            ));
        }

        let mut config = load_config()?;

        if let Some(theme) = &self.theme {
            config.ui.theme_mode = theme.parse::<ThemeMode>().map_err(CliError::validation)?;
        }

        let config = self.plates.resolve(config)?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

fn theme_name(mode: ThemeMode) -> String {
    format!("{mode:?}").to_lowercase()
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        plates: &config.plates,
        ceilings: &config.ceilings,
        ui: UiOutput {
            theme: theme_name(config.ui.theme_mode),
            last_picklist: config
                .ui
                .last_picklist
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
    };
    print_json(&output)
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Picklist Viewer Configuration");
    println!("=============================");
    println!();

    println!("Plates:");
    println!(
        "  Source:      {} rows x {} columns",
        config.plates.source_rows, config.plates.source_cols
    );
    println!(
        "  Destination: {} rows x {} columns",
        config.plates.dest_rows, config.plates.dest_cols
    );
    println!();

    println!("Ceilings:");
    println!("  Source well:      {:.1} nl", config.ceilings.source_nl);
    println!("  Destination well: {:.1} nl", config.ceilings.dest_nl);
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", theme_name(config.ui.theme_mode));
    if let Some(path) = &config.ui.last_picklist {
        println!("  Last Picklist: {}", path.display());
    }
    println!();
}
