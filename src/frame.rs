// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;
use crate::palette::SHADES;
use crate::surface::Surface;

/// Intensity below which a fading glyph is treated as gone.
const VISIBLE_FLOOR: f32 = 0.08;

/// Terminal-sized canvas that the rain paints on.
///
/// Each cell keeps a glyph and a float intensity. The overlay multiplies
/// intensities down; a fresh glyph sets its cell back to full. Only cells
/// whose visible [`Cell`] changed are queued for the terminal.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cell_size: u32,
    glyphs: Vec<char>,
    levels: Vec<f32>,
    cells: Vec<Cell>,
    lit: Vec<usize>,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

fn shade_of(level: f32) -> u8 {
    if level < VISIBLE_FLOOR {
        return 0;
    }
    ((level * SHADES as f32).ceil() as u8).clamp(1, SHADES)
}

impl Frame {
    pub fn new(width: u16, height: u16, cell_size: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cell_size: cell_size.max(1),
            glyphs: vec![' '; len],
            levels: vec![0.0; len],
            cells: vec![Cell::BLANK; len],
            lit: Vec::new(),
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    /// Size of the drawable surface in device-independent units.
    pub fn surface_size(&self) -> (u32, u32) {
        (
            self.width as u32 * self.cell_size,
            self.height as u32 * self.cell_size,
        )
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn has_changes(&self) -> bool {
        self.dirty_all || !self.dirty.is_empty()
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_all = false;
            self.dirty_map.fill(false);
            self.dirty.clear();
            return;
        }

        for &i in &self.dirty {
            if let Some(v) = self.dirty_map.get_mut(i) {
                *v = false;
            }
        }
        self.dirty.clear();
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells.get(i).copied().unwrap_or(Cell::BLANK)
    }

    /// Baseline `y` means the glyph sits in the row above it.
    fn locate(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let col = x as u32 / self.cell_size;
        let row = (y as u32 / self.cell_size).checked_sub(1)?;
        let col = u16::try_from(col).ok()?;
        let row = u16::try_from(row).ok()?;
        self.index(col, row)
    }

    fn refresh(&mut self, i: usize) {
        let shade = shade_of(self.levels[i]);
        let next = if shade == 0 {
            Cell::BLANK
        } else {
            Cell {
                ch: self.glyphs[i],
                shade,
            }
        };
        if self.cells[i] == next {
            return;
        }
        self.cells[i] = next;
        if !self.dirty_all && !self.dirty_map[i] {
            self.dirty_map[i] = true;
            self.dirty.push(i);
        }
    }
}

impl Surface for Frame {
    fn fill_overlay(&mut self, alpha: f32) {
        let keep = (1.0 - alpha).clamp(0.0, 1.0);
        let mut lit = std::mem::take(&mut self.lit);
        lit.retain(|&i| {
            let level = self.levels[i] * keep;
            self.levels[i] = if level < VISIBLE_FLOOR { 0.0 } else { level };
            self.refresh(i);
            self.levels[i] > 0.0
        });
        self.lit = lit;
    }

    fn draw_glyph(&mut self, ch: char, x: i32, y: i32) {
        let Some(i) = self.locate(x, y) else {
            return;
        };
        if self.levels[i] <= 0.0 {
            self.lit.push(i);
        }
        self.glyphs[i] = ch;
        self.levels[i] = 1.0;
        self.refresh(i);
    }
}
