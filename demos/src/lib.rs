//! Command-line handling shared by the `pathwalk` binary.
//!
//! ```text
//! pathwalk [--config FILE] [--seed N] [--set NAME=VALUE]... [--animate]
//!          [--max-ticks N] [--dump-config]
//! ```

use std::path::PathBuf;

use pathwalk_gen::{Config, ConfigError};
use thiserror::Error;

pub const USAGE: &str = "\
Usage: pathwalk [OPTIONS]

Options:
  --config FILE      read parameters from a JSON file
  --seed N           random seed (overrides the file)
  --set NAME=VALUE   set one parameter, may be repeated
  --animate          draw the walkers while they carve (q or ESC to stop)
  --max-ticks N      give up after N ticks
  --dump-config      print the effective parameters as JSON and exit
  -h, --help         show this message

Parameters: x_size y_size map_scale max_floor_count max_distance
  spawn_chance forward left right backward room_spawn room_size_x
  room_size_y initial_facings tick_interval seed

Set RUST_LOG=debug for generation logs.";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    BadNumber { flag: String, value: String },

    #[error("expected NAME=VALUE, got '{0}'")]
    BadAssignment(String),

    #[error("unknown option '{0}'")]
    UnknownFlag(String),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parsed command line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub sets: Vec<(String, String)>,
    pub animate: bool,
    pub max_ticks: Option<u64>,
    pub dump_config: bool,
    pub help: bool,
}

fn value(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String, CliError> {
    args.next().ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

fn number(flag: &str, text: String) -> Result<u64, CliError> {
    text.parse().map_err(|_| CliError::BadNumber {
        flag: flag.to_string(),
        value: text,
    })
}

impl Options {
    /// Parse arguments, not including the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
        let mut opts = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => opts.config = Some(value(&arg, &mut args)?.into()),
                "--seed" => opts.seed = Some(number(&arg, value(&arg, &mut args)?)?),
                "--max-ticks" => opts.max_ticks = Some(number(&arg, value(&arg, &mut args)?)?),
                "--set" => {
                    let text = value(&arg, &mut args)?;
                    let (name, val) = text
                        .split_once('=')
                        .ok_or_else(|| CliError::BadAssignment(text.clone()))?;
                    opts.sets.push((name.trim().to_string(), val.to_string()));
                }
                "--animate" => opts.animate = true,
                "--dump-config" => opts.dump_config = true,
                "-h" | "--help" => opts.help = true,
                _ => return Err(CliError::UnknownFlag(arg)),
            }
        }
        Ok(opts)
    }

    /// Build the run parameters: defaults, then the file, then `--set`
    /// assignments in order, then `--seed`.
    pub fn load_config(&self) -> Result<Config, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })?;
                Config::from_json(&text)?
            }
            None => Config::default(),
        };
        for (name, val) in &self.sets {
            config.set_param(name, val)?;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        log::debug!("effective configuration: {config:?}");
        Ok(config)
    }
}
