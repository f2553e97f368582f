// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::Frame;
use crate::palette::Palette;
use crate::runtime::ColorMode;

/// Pen state last sent to the terminal, so runs of equal style skip escapes.
#[derive(Default)]
struct Pen {
    fg: Option<Option<Color>>,
    bg: Option<Option<Color>>,
    bold: bool,
}

pub struct Terminal {
    stdout: Stdout,
    palette: Palette,
    color_mode: ColorMode,
    last_size: Option<(u16, u16)>,
    run_buf: String,
}

impl Terminal {
    pub fn new(palette: Palette, color_mode: ColorMode) -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            palette,
            color_mode,
            last_size: None,
            run_buf: String::with_capacity(64),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    fn set_pen(&mut self, pen: &mut Pen, fg: Option<Color>, bold: bool) -> Result<()> {
        if pen.fg != Some(fg) {
            self.stdout
                .queue(SetForegroundColor(fg.unwrap_or(Color::Reset)))?;
            pen.fg = Some(fg);
        }
        let bg = self.palette.bg;
        if pen.bg != Some(bg) {
            self.stdout
                .queue(SetBackgroundColor(bg.unwrap_or(Color::Reset)))?;
            pen.bg = Some(bg);
        }
        if pen.bold != bold {
            self.stdout.queue(SetAttribute(if bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }))?;
            pen.bold = bold;
        }
        Ok(())
    }

    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let size = (frame.width, frame.height);
        let resized = self.last_size != Some(size);
        if resized {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
            self.last_size = Some(size);
        }

        let total = frame.width as usize * frame.height as usize;
        let dirty_is_large = total > 0 && frame.dirty_indices().len() >= total / 3;
        let mut pen = Pen::default();

        if resized || frame.is_dirty_all() || dirty_is_large {
            for y in 0..frame.height {
                self.stdout.queue(cursor::MoveTo(0, y))?;
                for x in 0..frame.width {
                    let idx = y as usize * frame.width as usize + x as usize;
                    let cell = frame.cell_at_index(idx);
                    let fg = self.palette.fg(cell.shade);
                    let bold = self.palette.bold(cell.shade, self.color_mode);
                    self.set_pen(&mut pen, fg, bold)?;
                    self.stdout.queue(Print(cell.ch))?;
                }
            }
        } else {
            let width = frame.width as usize;
            let mut dirty = frame.dirty_indices().to_vec();
            dirty.sort_unstable();

            let mut i = 0usize;
            while i < dirty.len() {
                let idx0 = dirty[i];
                let cell0 = frame.cell_at_index(idx0);
                let fg = self.palette.fg(cell0.shade);
                let bold = self.palette.bold(cell0.shade, self.color_mode);

                // Extend the run over adjacent cells of the same style.
                self.run_buf.clear();
                self.run_buf.push(cell0.ch);
                let mut j = i + 1;
                while j < dirty.len()
                    && dirty[j] == dirty[j - 1] + 1
                    && dirty[j] % width != 0
                {
                    let cell = frame.cell_at_index(dirty[j]);
                    if self.palette.fg(cell.shade) != fg
                        || self.palette.bold(cell.shade, self.color_mode) != bold
                    {
                        break;
                    }
                    self.run_buf.push(cell.ch);
                    j += 1;
                }

                let x = (idx0 % width) as u16;
                let y = (idx0 / width) as u16;
                self.stdout.queue(cursor::MoveTo(x, y))?;
                self.set_pen(&mut pen, fg, bold)?;
                self.stdout.queue(Print(self.run_buf.as_str()))?;
                i = j;
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
