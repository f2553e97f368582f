// Copyright (c) 2026 rezky_nightky

use clap::Parser;

use crate::error::{ConfigError, Result};

pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*()*&^%";
pub const DEFAULT_WORD: &str = "MARKET CRASH";
pub const DEFAULT_TEXT_COLOR: &str = "#87170E";
pub const DEFAULT_INTRO: &str = "THE CRYPTO CRISIS";

/// Everything the rain engine needs, fixed at construction and re-applied on
/// every resize.
#[derive(Clone, Debug, PartialEq)]
pub struct RainConfig {
    /// Glyph cell edge length in surface units.
    pub cell_size: u32,
    pub tick_interval_ms: u64,
    /// Per-column, per-tick chance of starting the special word once the
    /// surface has filled.
    pub word_probability: f32,
    pub hang_duration_ticks: u32,
    /// Fraction of the surface height a drop must reach to count as filled.
    pub fill_threshold: f32,
    /// Chance per tick that an idle drop below the bottom restarts at the top.
    pub reset_probability: f32,
    /// Alpha of the per-tick overlay that fades old glyphs.
    pub fade_alpha: f32,
    pub alphabet: Vec<char>,
    pub special_word: Vec<char>,
    pub intro_text: Option<String>,
    pub intro_ms: u64,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            cell_size: 13,
            tick_interval_ms: 70,
            word_probability: 0.0002,
            hang_duration_ticks: 20,
            fill_threshold: 1.0,
            reset_probability: 0.025,
            fade_alpha: 0.09,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            special_word: DEFAULT_WORD.chars().collect(),
            intro_text: None,
            intro_ms: 5000,
        }
    }
}

fn require_unit(name: &'static str, v: f32, min: f64) -> Result<()> {
    let value = v as f64;
    if !value.is_finite() || value < min || value > 1.0 {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max: 1.0,
        });
    }
    Ok(())
}

impl RainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if self.special_word.is_empty() {
            return Err(ConfigError::EmptyWord);
        }
        if self.hang_duration_ticks == 0 {
            return Err(ConfigError::OutOfRange {
                name: "hang duration",
                value: 0.0,
                min: 1.0,
                max: u32::MAX as f64,
            });
        }
        require_unit("word probability", self.word_probability, 0.0)?;
        require_unit("fill threshold", self.fill_threshold, 0.0)?;
        require_unit("reset probability", self.reset_probability, 0.0)?;
        require_unit("fade alpha", self.fade_alpha, 0.001)?;
        Ok(())
    }

    /// Intro duration rounded up to whole ticks.
    pub fn intro_ticks(&self) -> u32 {
        let tick = self.tick_interval_ms.max(1);
        let ticks = self.intro_ms.div_ceil(tick);
        ticks.min(u32::MAX as u64) as u32
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBg {
    #[value(name = "black")]
    Black,
    #[value(name = "default-background")]
    DefaultBackground,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "wordrain", version)]
pub struct Args {
    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (<=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed the random source for a reproducible rain"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "intro",
        default_value = DEFAULT_INTRO,
        help_heading = "GENERAL",
        help = "Banner shown before the rain starts (empty disables)"
    )]
    pub intro: String,

    #[arg(
        long = "intro-ms",
        default_value_t = 5000,
        help_heading = "GENERAL",
        help = "How long the intro banner stays up, in ms"
    )]
    pub intro_ms: u64,

    #[arg(
        short = 'C',
        long = "cell-size",
        default_value_t = 13,
        help_heading = "RAIN",
        help = "Glyph cell edge length in surface units (min 1)"
    )]
    pub cell_size: u32,

    #[arg(
        short = 't',
        long = "tick-ms",
        default_value_t = 70,
        help_heading = "RAIN",
        help = "Tick interval in ms (min 1)"
    )]
    pub tick_ms: u64,

    #[arg(
        short = 'A',
        long = "alphabet",
        default_value = DEFAULT_ALPHABET,
        help_heading = "RAIN",
        help = "Characters sampled by idle columns"
    )]
    pub alphabet: String,

    #[arg(
        long = "fill-threshold",
        default_value_t = 1.0,
        help_heading = "RAIN",
        help = "Fraction of the height a drop must reach to count as filled (min 0 max 1)"
    )]
    pub fill_threshold: f32,

    #[arg(
        long = "reset-prob",
        default_value_t = 0.025,
        help_heading = "RAIN",
        help = "Chance per tick that a drop below the bottom restarts (min 0 max 1)"
    )]
    pub reset_prob: f32,

    #[arg(
        short = 'w',
        long = "word",
        default_value = DEFAULT_WORD,
        help_heading = "WORD",
        help = "Special word spelled down a column"
    )]
    pub word: String,

    #[arg(
        long = "word-prob",
        default_value_t = 0.0002,
        help_heading = "WORD",
        help = "Per-column chance per tick of spelling the word (min 0 max 1)"
    )]
    pub word_prob: f32,

    #[arg(
        long = "hang-ticks",
        default_value_t = 20,
        help_heading = "WORD",
        help = "Ticks a finished word hangs on screen (min 1)"
    )]
    pub hang_ticks: u32,

    #[arg(
        short = 'c',
        long = "color",
        default_value = DEFAULT_TEXT_COLOR,
        help_heading = "APPEARANCE",
        help = "Glyph color as #RRGGBB"
    )]
    pub color: String,

    #[arg(
        long = "color-bg",
        default_value_t = ColorBg::Black,
        value_enum,
        help_heading = "APPEARANCE",
        help = "Background mode (black, default-background)"
    )]
    pub color_bg: ColorBg,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,16,8/256,24/32). Default: detected from COLORTERM/TERM"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "fade",
        default_value_t = 0.09,
        help_heading = "APPEARANCE",
        help = "Overlay alpha applied every tick; higher fades trails faster (min 0.001 max 1)"
    )]
    pub fade: f32,
}

impl Args {
    pub fn rain_config(&self) -> Result<RainConfig> {
        let cfg = RainConfig {
            cell_size: self.cell_size,
            tick_interval_ms: self.tick_ms,
            word_probability: self.word_prob,
            hang_duration_ticks: self.hang_ticks,
            fill_threshold: self.fill_threshold,
            reset_probability: self.reset_prob,
            fade_alpha: self.fade,
            alphabet: self.alphabet.chars().collect(),
            special_word: self.word.chars().collect(),
            intro_text: Some(self.intro.clone()).filter(|t| !t.is_empty()),
            intro_ms: self.intro_ms,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}
