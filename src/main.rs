// Copyright (c) 2026 rezky_nightky

mod banner;
mod cell;
mod column;
mod config;
mod engine;
mod error;
mod frame;
mod palette;
mod rng;
mod runtime;
mod surface;
mod terminal;

use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use log::{debug, info};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{Args, ColorBg};
use crate::engine::RainEngine;
use crate::frame::Frame;
use crate::palette::{build_palette, Rgb};
use crate::rng::StdEntropy;
use crate::runtime::ColorMode;
use crate::terminal::{restore_terminal_best_effort, Terminal};

const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 2000;
const TICK_STEP_MS: u64 = 10;

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Red))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Red))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{}", msg);
    std::process::exit(1);
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let matches = Args::command().styles(clap_styles()).get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let cfg = args.rain_config().unwrap_or_else(|e| fail(e));
    let text_color = Rgb::parse_hex(&args.color).unwrap_or_else(|e| fail(e));
    let color_mode = match args.colormode {
        Some(v) => ColorMode::from_flag(v).unwrap_or_else(|e| fail(e)),
        None => ColorMode::detect(),
    };

    let end_after = match args.duration {
        Some(s) if !s.is_finite() => {
            fail(format!("failed to apply --duration {} (must be a finite number)", s))
        }
        Some(s) if s > 0.0 => Some(Duration::from_secs_f64(s.min(86400.0))),
        _ => None,
    };

    let mut rng = match args.seed {
        Some(seed) => StdEntropy::from_seed(seed),
        None => StdEntropy::from_os(),
    };

    info!(
        "color mode {}, cell {} units, tick {} ms",
        color_mode.label(),
        cfg.cell_size,
        cfg.tick_interval_ms
    );

    let palette = build_palette(
        text_color,
        color_mode,
        args.color_bg == ColorBg::DefaultBackground,
    );
    let cell_size = cfg.cell_size;

    let mut term = Terminal::new(palette, color_mode)?;
    let (w, h) = term.size()?;
    let mut frame = Frame::new(w, h, cell_size);
    let (sw, sh) = frame.surface_size();
    let mut engine = RainEngine::new(cfg, sw, sh).unwrap_or_else(|e| {
        restore_terminal_best_effort();
        fail(e)
    });
    let mut tick_ms = engine.config().tick_interval_ms;

    let start_time = Instant::now();
    let end_time = end_after.map(|d| start_time + d);
    let mut next_tick = Instant::now();
    let mut paused = false;
    let mut running = true;

    while running {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;
        let mut force_reset = false;

        // Events only ever land between ticks.
        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                match Terminal::read_event()? {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if args.screensaver {
                            running = false;
                            break;
                        }

                        match k.code {
                            KeyCode::Esc | KeyCode::Char('q') => running = false,
                            KeyCode::Char('p') => paused = !paused,
                            KeyCode::Char(' ') => force_reset = true,
                            KeyCode::Up => {
                                tick_ms = tick_ms.saturating_sub(TICK_STEP_MS).max(MIN_TICK_MS);
                                debug!("tick interval {} ms", tick_ms);
                            }
                            KeyCode::Down => {
                                tick_ms = (tick_ms + TICK_STEP_MS).min(MAX_TICK_MS);
                                debug!("tick interval {} ms", tick_ms);
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if !running || pending_resize.is_some() || force_reset {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                break;
            }

            let mut timeout = next_tick - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !running {
            break;
        }

        if pending_resize.is_some() || force_reset {
            let (nw, nh) = pending_resize.unwrap_or((frame.width, frame.height));
            frame = Frame::new(nw, nh, cell_size);
            let (sw, sh) = frame.surface_size();
            engine.resize(sw, sh);
            term.draw(&mut frame)?;
        }

        let now = Instant::now();
        if now < next_tick {
            continue;
        }

        if !paused {
            engine.tick(&mut frame, &mut rng);
        }
        if frame.has_changes() {
            term.draw(&mut frame)?;
        }

        next_tick += Duration::from_millis(tick_ms);
        let now = Instant::now();
        if now > next_tick {
            next_tick = now;
        }
    }

    debug!(
        "stopping after {:.1}s: {} columns, gate {:?}, {} words hanging",
        start_time.elapsed().as_secs_f64(),
        engine.column_count(),
        engine.gate(),
        engine.hanging_words().len()
    );
    Ok(())
}
