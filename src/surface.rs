// Copyright (c) 2026 rezky_nightky

/// Paintable area the rain draws onto.
///
/// Coordinates are device-independent units. `y` is a text baseline: a glyph
/// drawn at `y` occupies the cell row that ends at `y`.
pub trait Surface {
    /// Paint a translucent full-surface overlay. `alpha` is in `(0, 1]`.
    fn fill_overlay(&mut self, alpha: f32);

    fn draw_glyph(&mut self, ch: char, x: i32, y: i32);
}

#[cfg(test)]
pub mod recording {
    use super::Surface;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Overlay(f32),
        Glyph(char, i32, i32),
    }

    /// Keeps every call so tests can assert on exact draw positions.
    #[derive(Default)]
    pub struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Recorder {
        pub fn glyphs(&self) -> impl Iterator<Item = (char, i32, i32)> + '_ {
            self.ops.iter().filter_map(|op| match *op {
                Op::Glyph(ch, x, y) => Some((ch, x, y)),
                Op::Overlay(_) => None,
            })
        }

        pub fn glyphs_at_x(&self, x: i32) -> Vec<(char, i32)> {
            self.glyphs()
                .filter(|&(_, gx, _)| gx == x)
                .map(|(ch, _, y)| (ch, y))
                .collect()
        }

        pub fn clear(&mut self) {
            self.ops.clear();
        }
    }

    impl Surface for Recorder {
        fn fill_overlay(&mut self, alpha: f32) {
            self.ops.push(Op::Overlay(alpha));
        }

        fn draw_glyph(&mut self, ch: char, x: i32, y: i32) {
            self.ops.push(Op::Glyph(ch, x, y));
        }
    }
}
