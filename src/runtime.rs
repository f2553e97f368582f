// Copyright (c) 2025 rezk_nightky

use std::env;

use crate::error::{ConfigError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color16,
    Color256,
    TrueColor,
}

impl ColorMode {
    pub fn from_flag(v: u16) -> Result<Self> {
        match v {
            0 => Ok(ColorMode::Mono),
            16 => Ok(ColorMode::Color16),
            8 | 256 => Ok(ColorMode::Color256),
            24 | 32 => Ok(ColorMode::TrueColor),
            other => Err(ConfigError::InvalidColorMode(other)),
        }
    }

    pub fn detect() -> Self {
        Self::from_env(
            &env::var("COLORTERM").unwrap_or_default(),
            &env::var("TERM").unwrap_or_default(),
        )
    }

    fn from_env(colorterm: &str, term: &str) -> Self {
        let colorterm = colorterm.to_ascii_lowercase();
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return ColorMode::TrueColor;
        }

        let term = term.to_ascii_lowercase();
        if term == "dumb" {
            return ColorMode::Mono;
        }
        if term.contains("256color") {
            return ColorMode::Color256;
        }
        if term.is_empty() || term == "linux" {
            return ColorMode::Color16;
        }

        ColorMode::Color256
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorMode::TrueColor => "24-bit truecolor",
            ColorMode::Color256 => "8-bit (256-color)",
            ColorMode::Color16 => "16-color",
            ColorMode::Mono => "mono",
        }
    }
}
