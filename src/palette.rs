// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::error::{ConfigError, Result};
use crate::runtime::ColorMode;

/// Number of visible brightness steps between a dying glyph and a fresh one.
pub const SHADES: u8 = 12;

/// Brightness of the dimmest visible shade relative to the text colour.
const DIMMEST: f32 = 0.12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn parse_hex(s: &str) -> Result<Self> {
        let err = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    fn lerp(self, to: Rgb, t: f32) -> Rgb {
        let mix = |a: u8, b: u8| {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, to.r),
            g: mix(self.g, to.g),
            b: mix(self.b, to.b),
        }
    }

    fn dist2(self, o: Rgb) -> i32 {
        let dr = self.r as i32 - o.r as i32;
        let dg = self.g as i32 - o.g as i32;
        let db = self.b as i32 - o.b as i32;
        dr * dr + dg * dg + db * db
    }

    /// Nearest xterm-256 index, picking between the colour cube and the
    /// grey ramp.
    fn to_ansi256(self) -> u8 {
        const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
        let level = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;

        let (r6, g6, b6) = (level(self.r), level(self.g), level(self.b));
        let cube = Rgb {
            r: CUBE_LEVELS[r6 as usize],
            g: CUBE_LEVELS[g6 as usize],
            b: CUBE_LEVELS[b6 as usize],
        };
        let cube_idx = 16 + 36 * r6 + 6 * g6 + b6;

        let avg = ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8;
        let (gray_idx, gray) = match avg {
            0..=7 => (16, Rgb::BLACK),
            239..=255 => (231, Rgb { r: 255, g: 255, b: 255 }),
            _ => {
                let idx = 232 + (avg - 8) / 10;
                let v = 8 + 10 * (idx - 232);
                (idx, Rgb { r: v, g: v, b: v })
            }
        };

        if self.dist2(gray) < self.dist2(cube) {
            gray_idx
        } else {
            cube_idx
        }
    }

    fn to_color16(self) -> Color {
        const TABLE: [(Color, Rgb); 16] = [
            (Color::Black, Rgb { r: 0, g: 0, b: 0 }),
            (Color::DarkGrey, Rgb { r: 128, g: 128, b: 128 }),
            (Color::Grey, Rgb { r: 192, g: 192, b: 192 }),
            (Color::White, Rgb { r: 255, g: 255, b: 255 }),
            (Color::DarkRed, Rgb { r: 128, g: 0, b: 0 }),
            (Color::Red, Rgb { r: 255, g: 0, b: 0 }),
            (Color::DarkGreen, Rgb { r: 0, g: 128, b: 0 }),
            (Color::Green, Rgb { r: 0, g: 255, b: 0 }),
            (Color::DarkBlue, Rgb { r: 0, g: 0, b: 128 }),
            (Color::Blue, Rgb { r: 0, g: 0, b: 255 }),
            (Color::DarkCyan, Rgb { r: 0, g: 128, b: 128 }),
            (Color::Cyan, Rgb { r: 0, g: 255, b: 255 }),
            (Color::DarkMagenta, Rgb { r: 128, g: 0, b: 128 }),
            (Color::Magenta, Rgb { r: 255, g: 0, b: 255 }),
            (Color::DarkYellow, Rgb { r: 128, g: 128, b: 0 }),
            (Color::Yellow, Rgb { r: 255, g: 255, b: 0 }),
        ];

        TABLE
            .iter()
            .min_by_key(|(_, rgb)| self.dist2(*rgb))
            .map(|(c, _)| *c)
            .unwrap_or(Color::White)
    }

    pub fn to_color(self, mode: ColorMode) -> Option<Color> {
        match mode {
            ColorMode::Mono => None,
            ColorMode::Color16 => Some(self.to_color16()),
            ColorMode::Color256 => Some(Color::AnsiValue(self.to_ansi256())),
            ColorMode::TrueColor => Some(Color::Rgb {
                r: self.r,
                g: self.g,
                b: self.b,
            }),
        }
    }
}

/// Foreground per shade plus the background every cell is painted on.
#[derive(Clone, Debug)]
pub struct Palette {
    shades: Vec<Option<Color>>,
    pub bg: Option<Color>,
}

impl Palette {
    pub fn fg(&self, shade: u8) -> Option<Color> {
        if shade == 0 {
            return None;
        }
        let idx = (shade as usize - 1).min(self.shades.len().saturating_sub(1));
        self.shades.get(idx).copied().flatten()
    }

    /// Mono terminals cannot dim, so only the freshest shade is bold.
    pub fn bold(&self, shade: u8, mode: ColorMode) -> bool {
        mode == ColorMode::Mono && shade == SHADES
    }
}

pub fn build_palette(text: Rgb, mode: ColorMode, default_background: bool) -> Palette {
    let bg = if default_background {
        None
    } else {
        Rgb::BLACK.to_color(mode)
    };

    let steps = SHADES.max(2) as usize;
    let shades = (0..steps)
        .map(|i| {
            let t = DIMMEST + (1.0 - DIMMEST) * (i as f32) / ((steps - 1) as f32);
            Rgb::BLACK.lerp(text, t).to_color(mode)
        })
        .collect();

    Palette { shades, bg }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        let want = Rgb {
            r: 0x87,
            g: 0x17,
            b: 0x0E,
        };
        assert_eq!(Rgb::parse_hex("#87170E").unwrap(), want);
        assert_eq!(Rgb::parse_hex("87170e").unwrap(), want);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Rgb::parse_hex("#8717").is_err());
        assert!(Rgb::parse_hex("#zz170E").is_err());
        assert!(Rgb::parse_hex("#87170E00").is_err());
    }

    #[test]
    fn brightest_shade_is_the_text_color() {
        let text = Rgb {
            r: 0x87,
            g: 0x17,
            b: 0x0E,
        };
        let p = build_palette(text, ColorMode::TrueColor, false);
        assert_eq!(
            p.fg(SHADES),
            Some(Color::Rgb {
                r: 0x87,
                g: 0x17,
                b: 0x0E
            })
        );
        assert_eq!(p.fg(0), None);
        assert_eq!(p.bg, Some(Color::Rgb { r: 0, g: 0, b: 0 }));
    }

    #[test]
    fn shades_get_brighter() {
        let text = Rgb { r: 200, g: 0, b: 0 };
        let p = build_palette(text, ColorMode::TrueColor, true);
        let reds: Vec<u8> = (1..=SHADES)
            .map(|s| match p.fg(s) {
                Some(Color::Rgb { r, .. }) => r,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(p.bg, None);
    }

    #[test]
    fn ansi256_maps_pure_colors_into_the_cube() {
        assert_eq!(Rgb { r: 255, g: 0, b: 0 }.to_ansi256(), 196);
        assert_eq!(Rgb::BLACK.to_ansi256(), 16);
    }

    #[test]
    fn mono_has_no_foreground_but_bolds_fresh_glyphs() {
        let p = build_palette(Rgb::BLACK, ColorMode::Mono, false);
        assert_eq!(p.fg(SHADES), None);
        assert!(p.bold(SHADES, ColorMode::Mono));
        assert!(!p.bold(1, ColorMode::Mono));
    }
}
