//! Interactive retrigger example.
//!
//! Press SPACE to strike a 330 Hz tone through the shaped envelope. Each
//! strike plays attack, hold and decay, then repeats twice on its own.
//! Striking again while the tone rings ramps it down first instead of
//! cutting it off.
//! Press Q or ESC to quit.

mod common;

use anyhow::Result;
use common::{BlockRenderer, KeyAction, is_quit_key, run_block_demo};
use crossterm::{
    ExecutableCommand,
    event::{KeyCode, KeyEvent, KeyEventKind},
};
use envshaper::shape::INVERTED_EXPONENTIAL;
use envshaper::{AudioBlock, EnvelopeConfig, ShapedEnvelope, SineSource};
use std::cell::Cell;
use std::io::{Write, stdout};

const SAMPLE_RATE: f64 = 44100.0;

struct Renderer {
    tone: SineSource,
    envelope: ShapedEnvelope,
}

impl BlockRenderer for Renderer {
    fn render(&mut self, block: &mut AudioBlock) {
        block.fill_from(&mut self.tone);
        if !self.envelope.process_block(block.samples_mut()) {
            block.samples_mut().fill(0);
        }
    }
}

fn draw_ui(strikes: u32) -> Result<()> {
    let mut stdout = stdout();
    stdout.execute(crossterm::terminal::Clear(
        crossterm::terminal::ClearType::All,
    ))?;
    stdout.execute(crossterm::cursor::MoveTo(0, 0))?;
    write!(
        stdout,
        "Shaped envelope | strikes: {strikes:<4} | SPACE=strike  Q=quit"
    )?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    // Raw mode owns the screen, so only warnings go to stderr
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let config = EnvelopeConfig::from_seconds(0.01, 0.05, 0.4, SAMPLE_RATE)
        .with_forced_decay_seconds(0.005, SAMPLE_RATE)
        .with_max_retriggers(2);
    let envelope = ShapedEnvelope::new(config).with_table(&INVERTED_EXPONENTIAL);
    let trigger = envelope.trigger_handle();

    let renderer = Renderer {
        tone: SineSource::new(330.0, 0.3, SAMPLE_RATE),
        envelope,
    };
    let strikes = Cell::new(0u32);

    run_block_demo(
        renderer,
        || draw_ui(0),
        |key_event: &KeyEvent| {
            if !matches!(key_event.kind, KeyEventKind::Press) {
                return Ok(KeyAction::Continue);
            }
            if is_quit_key(key_event.code) {
                return Ok(KeyAction::Exit);
            }
            if let KeyCode::Char(' ') = key_event.code {
                trigger.note_on();
                strikes.set(strikes.get() + 1);
                draw_ui(strikes.get())?;
            }
            Ok(KeyAction::Continue)
        },
    )?;

    println!("\nGoodbye!");
    Ok(())
}
