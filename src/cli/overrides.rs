//! Plate setting flags shared by the TUI launcher and headless commands.

use clap::Args;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;

/// Per-run overrides for plate dimensions and ceilings.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct PlateOverrides {
    /// Rows on the source plate
    #[arg(long, value_name = "N")]
    pub source_rows: Option<usize>,

    /// Columns on the source plate
    #[arg(long, value_name = "N")]
    pub source_cols: Option<usize>,

    /// Rows on the destination plate
    #[arg(long, value_name = "N")]
    pub dest_rows: Option<usize>,

    /// Columns on the destination plate
    #[arg(long, value_name = "N")]
    pub dest_cols: Option<usize>,

    /// Maximum volume per source well (nL)
    #[arg(long, value_name = "NL")]
    pub source_ceiling: Option<f64>,

    /// Maximum volume per destination well (nL)
    #[arg(long, value_name = "NL")]
    pub dest_ceiling: Option<f64>,
}

impl PlateOverrides {
    /// True when no flag was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes the given flags into `config`, leaving the rest untouched.
    pub fn apply(&self, config: &mut Config) {
        let plates = &mut config.plates;
        if let Some(rows) = self.source_rows {
            plates.source_rows = rows;
        }
        if let Some(cols) = self.source_cols {
            plates.source_cols = cols;
        }
        if let Some(rows) = self.dest_rows {
            plates.dest_rows = rows;
        }
        if let Some(cols) = self.dest_cols {
            plates.dest_cols = cols;
        }

        let ceilings = &mut config.ceilings;
        if let Some(nl) = self.source_ceiling {
            ceilings.source_nl = nl;
        }
        if let Some(nl) = self.dest_ceiling {
            ceilings.dest_nl = nl;
        }
    }

    /// Applies the flags and validates the result.
    pub fn resolve(&self, mut config: Config) -> CliResult<Config> {
        self.apply(&mut config);
        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_given_flags() {
        let overrides = PlateOverrides {
            dest_rows: Some(32),
            dest_ceiling: Some(10_000.0),
            ..PlateOverrides::default()
        };
        let config = overrides.resolve(Config::new()).unwrap();
        assert_eq!(config.plates.dest_rows, 32);
        assert_eq!(config.plates.dest_cols, 24);
        assert_eq!(config.plates.source_rows, 16);
        assert!((config.ceilings.dest_nl - 10_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_rejects_too_many_rows() {
        let overrides = PlateOverrides {
            source_rows: Some(60),
            ..PlateOverrides::default()
        };
        let err = overrides.resolve(Config::new()).unwrap_err();
        assert_eq!(err.exit_code.code(), 1);
        assert!(err.message.contains("60"));
    }

    #[test]
    fn test_is_empty() {
        assert!(PlateOverrides::default().is_empty());
        let overrides = PlateOverrides {
            source_cols: Some(12),
            ..PlateOverrides::default()
        };
        assert!(!overrides.is_empty());
    }
}
