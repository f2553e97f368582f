// Copyright (c) 2026 rezky_nightky

use thiserror::Error;

/// Rejected rain configuration. Raised before any terminal state is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,

    #[error("alphabet must contain at least one character")]
    EmptyAlphabet,

    #[error("special word must contain at least one character")]
    EmptyWord,

    #[error("{name} must be a finite number in [{min}, {max}] (got {value})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid color {0:?} (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("invalid --colormode {0} (allowed: 0, 16, 8/256, 24/32)")]
    InvalidColorMode(u16),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
