// Copyright (c) 2026 rezky_nightky

/// What a terminal cell shows: a glyph and how bright it still is.
/// Shade 0 is blank; higher shades index further into the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub shade: u8,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', shade: 0 };

    #[cfg(test)]
    pub fn is_blank(self) -> bool {
        self.shade == 0
    }
}
