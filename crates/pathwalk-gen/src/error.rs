//! Error types for configuration and generation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// An invalid parameter set. Detected before a run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("map size must be positive, got {0}x{1}")]
    InvalidSize(i32, i32),

    #[error("map scale must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("{name} must be within 0..=100, got {value}")]
    ChanceOutOfRange { name: &'static str, value: u32 },

    #[error("turn chances add up to {0}, which exceeds 100")]
    TurnWeightsExceed(u32),

    #[error("room size must be positive, got {0}x{1}")]
    InvalidRoomSize(i32, i32),

    #[error("walker distance must be at least 1")]
    ZeroDistance,

    #[error("tick interval must be at least 1")]
    ZeroTickInterval,

    #[error("at least one initial facing is required")]
    NoInitialFacing,

    #[error("unknown parameter '{0}'")]
    UnknownParam(String),

    #[error("invalid value '{value}' for parameter '{name}'")]
    ParseParam { name: String, value: String },

    #[cfg(feature = "serde")]
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A walker touched a cell outside the map. This is a bug, not bad input.
    #[error(transparent)]
    Grid(#[from] pathwalk_core::Error),

    #[error("generation did not finish within {0} ticks")]
    TickLimit(u64),
}
