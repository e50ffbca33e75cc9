//! Shared audio and terminal plumbing for the demos.

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, StreamConfig};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use envshaper::{AudioBlock, BLOCK_SAMPLES};
use std::io::stdout;
use std::panic;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Something that renders one block of audio per tick.
///
/// The output callback asks for a fresh block whenever the previous one has
/// been played out, so the renderer always works in whole blocks.
pub trait BlockRenderer: Send + 'static {
    fn render(&mut self, block: &mut AudioBlock);
}

/// Key handling result that controls the event loop
pub enum KeyAction {
    Continue,
    Exit,
}

/// Plays `renderer` on the default output device and runs a key loop until
/// `key_handler` asks to exit.
///
/// Sets up raw mode and the alternate screen, and restores the terminal on
/// exit or panic.
pub fn run_block_demo<R, F, K>(renderer: R, initial_ui: F, key_handler: K) -> Result<()>
where
    R: BlockRenderer,
    F: FnOnce() -> Result<()>,
    K: Fn(&KeyEvent) -> Result<KeyAction>,
{
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No output device available"))?;

    let config = device.default_output_config()?;
    let renderer = Arc::new(Mutex::new(renderer));

    let _stream = match config.sample_format() {
        SampleFormat::F32 => create_block_stream::<f32, R>(&device, &config.into(), renderer)?,
        SampleFormat::I16 => create_block_stream::<i16, R>(&device, &config.into(), renderer)?,
        SampleFormat::U16 => create_block_stream::<u16, R>(&device, &config.into(), renderer)?,
        sample_format => {
            return Err(anyhow::anyhow!(
                "Unsupported sample format: {}",
                sample_format
            ));
        }
    };

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(crossterm::cursor::Hide)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    initial_ui()?;

    loop {
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key_event) = event::read()?
        {
            match key_handler(&key_event)? {
                KeyAction::Continue => {}
                KeyAction::Exit => break,
            }
        }
    }

    cleanup_terminal();

    Ok(())
}

/// Creates an output stream that plays staged blocks, rendering the next one
/// each time the current block runs out.
fn create_block_stream<T, R>(
    device: &cpal::Device,
    config: &StreamConfig,
    renderer: Arc<Mutex<R>>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<i16> + cpal::SizedSample,
    R: BlockRenderer,
{
    let channels = config.channels as usize;
    let mut block = AudioBlock::new();
    let mut position = BLOCK_SAMPLES;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let Ok(mut renderer) = renderer.lock() else {
                return;
            };
            for frame in data.chunks_mut(channels) {
                if position == BLOCK_SAMPLES {
                    renderer.render(&mut block);
                    position = 0;
                }
                let value: T = T::from_sample(block.samples()[position]);
                position += 1;
                for s in frame.iter_mut() {
                    *s = value;
                }
            }
        },
        |err| tracing::error!("Audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

fn cleanup_terminal() {
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Helper to check if a key code is a quit key (Q, ESC).
pub fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}
