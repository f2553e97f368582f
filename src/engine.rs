// Copyright (c) 2026 rezky_nightky

use std::rc::Rc;

use log::{debug, info};

use crate::{
    banner::Banner,
    column::{Column, ColumnState, FillGate, HangingWord},
    config::RainConfig,
    error::Result,
    rng::Entropy,
    surface::Surface,
};

/// The rain: one state machine per column plus the words left hanging.
///
/// All mutable state is touched only from [`RainEngine::tick`] and
/// [`RainEngine::resize`]; both take `&mut self`, so a resize can only ever
/// land between two ticks.
pub struct RainEngine {
    config: RainConfig,
    word: Rc<[char]>,

    width: u32,
    height: u32,

    columns: Vec<Column>,
    filled_count: usize,
    gate: FillGate,

    hanging: Vec<HangingWord>,
    banner: Option<Banner>,
}

impl RainEngine {
    pub fn new(config: RainConfig, width: u32, height: u32) -> Result<Self> {
        config.validate()?;

        let word: Rc<[char]> = config.special_word.clone().into();
        let banner = config
            .intro_text
            .as_deref()
            .map(|text| Banner::new(text, config.intro_ticks()))
            .filter(Banner::is_showing);

        let mut engine = Self {
            config,
            word,
            width: 0,
            height: 0,
            columns: Vec::new(),
            filled_count: 0,
            gate: FillGate::Filling,
            hanging: Vec::new(),
            banner,
        };
        engine.resize(width, height);
        Ok(engine)
    }

    /// Full reset for a new surface size. Calling it twice with the same
    /// size leaves the same state both times.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        let count = (width / self.config.cell_size) as usize;
        self.columns.clear();
        self.columns.resize_with(count, Column::new);
        self.filled_count = 0;
        self.gate = FillGate::Filling;
        self.hanging.clear();

        debug!("surface {}x{} -> {} columns", width, height, count);
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[cfg(test)]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn hanging_words(&self) -> &[HangingWord] {
        &self.hanging
    }

    pub fn gate(&self) -> FillGate {
        self.gate
    }

    #[cfg(test)]
    pub fn showing_banner(&self) -> bool {
        self.banner.is_some()
    }

    pub fn tick<S, E>(&mut self, surface: &mut S, rng: &mut E)
    where
        S: Surface + ?Sized,
        E: Entropy + ?Sized,
    {
        surface.fill_overlay(self.config.fade_alpha);

        if let Some(banner) = &mut self.banner {
            if banner.is_showing() {
                banner.draw(surface, self.width, self.height, self.config.cell_size);
                banner.advance();
                return;
            }
            self.banner = None;
        }

        for i in 0..self.columns.len() {
            match self.columns[i].state {
                ColumnState::Idle => self.step_idle(i, surface, rng),
                ColumnState::SpellingWord { next_letter } => {
                    self.step_spelling(i, next_letter, surface)
                }
                ColumnState::Hanging { remaining_ticks } => self.step_hanging(i, remaining_ticks),
            }
        }

        self.draw_hanging(surface);
    }

    fn cell(&self) -> i64 {
        self.config.cell_size as i64
    }

    fn glyph_pos(&self, i: usize, drop_row: u32) -> (i32, i32) {
        let x = i as i64 * self.cell();
        let y = drop_row as i64 * self.cell();
        (clamp_i32(x), clamp_i32(y))
    }

    fn reached_fill_line(&self, drop_row: u32) -> bool {
        let y = drop_row as f64 * self.config.cell_size as f64;
        y >= self.height as f64 * self.config.fill_threshold as f64
    }

    fn past_bottom(&self, drop_row: u32) -> bool {
        drop_row as u64 * self.config.cell_size as u64 > self.height as u64
    }

    fn hung_past_fill_line(&self, drop_row: u32) -> bool {
        let rows = self.height as f64 / self.config.cell_size as f64;
        drop_row as f64 > rows * self.config.fill_threshold as f64
    }

    fn word_fits(&self, i: usize) -> bool {
        i + self.word.len() <= self.columns.len()
    }

    fn can_spawn_word<E: Entropy + ?Sized>(&self, i: usize, rng: &mut E) -> bool {
        self.gate.is_ready()
            && self.word_fits(i)
            && rng.chance() < self.config.word_probability
    }

    fn mark_filled(&mut self, i: usize) {
        if self.columns[i].filled_once {
            return;
        }
        self.columns[i].filled_once = true;
        self.filled_count += 1;
        if self.gate == FillGate::Filling && self.filled_count == self.columns.len() {
            self.gate = FillGate::Ready;
            info!("all {} columns filled, word spawning enabled", self.filled_count);
        }
    }

    fn step_idle<S, E>(&mut self, i: usize, surface: &mut S, rng: &mut E)
    where
        S: Surface + ?Sized,
        E: Entropy + ?Sized,
    {
        let drop_row = self.columns[i].drop_row;
        let ch = self.config.alphabet[rng.pick(self.config.alphabet.len())];
        let (x, y) = self.glyph_pos(i, drop_row);
        surface.draw_glyph(ch, x, y);

        if self.reached_fill_line(drop_row) {
            self.mark_filled(i);
        }

        if self.can_spawn_word(i, rng) {
            debug!("column {} starts spelling at row {}", i, drop_row);
            self.columns[i].state = ColumnState::SpellingWord { next_letter: 0 };
        }

        let restart =
            self.past_bottom(drop_row) && rng.chance() < self.config.reset_probability;
        let col = &mut self.columns[i];
        if restart {
            // A restart also drops a word spawned on this same tick.
            col.drop_row = 0;
            col.state = ColumnState::Idle;
        }
        col.drop_row = col.drop_row.saturating_add(1);
    }

    fn step_spelling<S: Surface + ?Sized>(&mut self, i: usize, next_letter: usize, surface: &mut S) {
        let drop_row = self.columns[i].drop_row;
        if let Some(&ch) = self.word.get(next_letter) {
            let (x, y) = self.glyph_pos(i, drop_row);
            surface.draw_glyph(ch, x, y);
        }

        let next_letter = (next_letter + 1).min(self.word.len());
        let drop_row = drop_row.saturating_add(1);
        self.columns[i].drop_row = drop_row;

        if next_letter < self.word.len() {
            self.columns[i].state = ColumnState::SpellingWord { next_letter };
            return;
        }

        let hang = self.config.hang_duration_ticks;
        let (origin_x, bottom) = self.glyph_pos(i, drop_row);
        let word_h = self.word.len() as i64 * self.cell();
        self.hanging.push(HangingWord {
            origin_x,
            origin_y: clamp_i32(bottom as i64 - word_h),
            text: Rc::clone(&self.word),
            remaining_ticks: hang,
        });
        self.columns[i].state = ColumnState::Hanging {
            remaining_ticks: hang,
        };
    }

    fn step_hanging(&mut self, i: usize, remaining_ticks: u32) {
        let remaining_ticks = remaining_ticks.saturating_sub(1);
        if remaining_ticks > 0 {
            self.columns[i].state = ColumnState::Hanging { remaining_ticks };
            return;
        }

        let reset = self.hung_past_fill_line(self.columns[i].drop_row);
        let col = &mut self.columns[i];
        col.state = ColumnState::Idle;
        if reset {
            col.drop_row = 0;
        }
    }

    fn draw_hanging<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let cell = clamp_i32(self.cell());
        self.hanging.retain_mut(|word| {
            word.draw(surface, cell);
            word.remaining_ticks = word.remaining_ticks.saturating_sub(1);
            word.remaining_ticks > 0
        });
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
