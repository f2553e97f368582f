// Copyright (c) 2026 rezky_nightky

use crate::surface::Surface;

/// Vertical position of the banner baseline, as a fraction of surface height.
const BANNER_Y_FRAC: f64 = 0.2;

/// Text shown for a fixed number of ticks before the rain starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    text: Vec<char>,
    remaining_ticks: u32,
}

impl Banner {
    pub fn new(text: &str, ticks: u32) -> Self {
        Self {
            text: text.chars().collect(),
            remaining_ticks: ticks,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.remaining_ticks > 0
    }

    /// Centred horizontally; may start left of the surface when too wide.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, width: u32, height: u32, cell: u32) {
        let cell = cell as i64;
        let text_w = self.text.len() as i64 * cell;
        let x0 = (width as i64 - text_w) / 2;
        let y = (height as f64 * BANNER_Y_FRAC) as i64;
        let Ok(y) = i32::try_from(y) else {
            return;
        };
        for (i, &ch) in self.text.iter().enumerate() {
            let x = x0 + i as i64 * cell;
            if let Ok(x) = i32::try_from(x) {
                surface.draw_glyph(ch, x, y);
            }
        }
    }

    pub fn advance(&mut self) {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::Recorder;

    #[test]
    fn banner_is_centred_at_one_fifth_height() {
        let b = Banner::new("AB", 3);
        let mut rec = Recorder::default();
        b.draw(&mut rec, 130, 130, 13);
        let glyphs: Vec<_> = rec.glyphs().collect();
        assert_eq!(glyphs, vec![('A', 52, 26), ('B', 65, 26)]);
    }

    #[test]
    fn wide_banner_starts_off_the_left_edge() {
        let b = Banner::new("ABCDEFGHIJKL", 1);
        let mut rec = Recorder::default();
        b.draw(&mut rec, 130, 130, 13);
        let first = rec.glyphs().next().unwrap();
        assert_eq!(first, ('A', -13, 26));
    }

    #[test]
    fn banner_counts_down_to_hidden() {
        let mut b = Banner::new("X", 2);
        assert!(b.is_showing());
        b.advance();
        assert!(b.is_showing());
        b.advance();
        assert!(!b.is_showing());
        b.advance();
        assert!(!b.is_showing());
    }
}
