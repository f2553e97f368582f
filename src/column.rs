// Copyright (c) 2026 rezky_nightky

use std::rc::Rc;

use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnState {
    /// Emits a random glyph every tick.
    Idle,
    /// Draws `word[next_letter]` this tick.
    SpellingWord { next_letter: usize },
    /// Word finished; the column waits before going back to idle.
    Hanging { remaining_ticks: u32 },
}

/// One vertical glyph lane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Current drop position in cell units.
    pub drop_row: u32,
    /// Set once the drop has reached the fill line since the last resize.
    pub filled_once: bool,
    pub state: ColumnState,
}

impl Column {
    pub fn new() -> Self {
        Self {
            drop_row: 1,
            filled_once: false,
            state: ColumnState::Idle,
        }
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

/// A completed word frozen on screen. Owned by the engine, not by the column
/// that spelled it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HangingWord {
    pub origin_x: i32,
    /// Baseline of the first letter.
    pub origin_y: i32,
    pub text: Rc<[char]>,
    pub remaining_ticks: u32,
}

impl HangingWord {
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, cell_size: i32) {
        let mut y = self.origin_y;
        for &ch in self.text.iter() {
            surface.draw_glyph(ch, self.origin_x, y);
            y = y.saturating_add(cell_size);
        }
    }
}

/// Whether the surface has been saturated enough to allow word spawning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillGate {
    Filling,
    Ready,
}

impl FillGate {
    pub fn is_ready(self) -> bool {
        self == FillGate::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{Op, Recorder};

    #[test]
    fn new_column_starts_idle_on_row_one() {
        let c = Column::new();
        assert_eq!(c.drop_row, 1);
        assert!(!c.filled_once);
        assert_eq!(c.state, ColumnState::Idle);
    }

    #[test]
    fn hanging_word_draws_letters_downward() {
        let word = HangingWord {
            origin_x: 26,
            origin_y: 39,
            text: "HI".chars().collect::<Vec<_>>().into(),
            remaining_ticks: 3,
        };
        let mut rec = Recorder::default();
        word.draw(&mut rec, 13);
        assert_eq!(rec.ops, vec![Op::Glyph('H', 26, 39), Op::Glyph('I', 26, 52)]);
    }
}
