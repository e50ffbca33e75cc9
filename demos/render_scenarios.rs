//! Renders the three reference envelope scenarios to WAV files.
//!
//! - `single.wav`: one attack/decay cycle, then silence
//! - `retriggers.wav`: the same cycle repeated twice on its own
//! - `forced.wav`: a second strike during decay, ramped down before restart
//!
//! Usage: `cargo run --example render_scenarios [output_dir]`

use anyhow::Result;
use envshaper::{BlockPool, BlockQueue, EnvelopeConfig, ShapedEnvelope, SineSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SAMPLE_RATE: u32 = 44100;
const BLOCKS: usize = 1200;

/// Renders `BLOCKS` blocks of tone, striking the envelope at the start of
/// each block listed in `strikes`.
fn render(config: EnvelopeConfig, strikes: &[usize]) -> Vec<i16> {
    let pool = Arc::new(BlockPool::new(2));
    let mut stream = BlockQueue::new(pool);
    let mut tone = SineSource::new(440.0, 0.5, SAMPLE_RATE as f64);
    let mut envelope = ShapedEnvelope::new(config);
    let trigger = envelope.trigger_handle();

    for block in 0..BLOCKS {
        if strikes.contains(&block) {
            trigger.note_on();
        }
        stream.push_from(&mut tone);
        envelope.update(&mut stream);
    }

    // Idle blocks are never transmitted; pad so every file has the same length
    let mut samples = stream.take_output();
    samples.resize(BLOCKS * envshaper::BLOCK_SAMPLES, 0);
    samples
}

fn write_wav(path: &Path, samples: &[i16]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    tracing::info!(path = %path.display(), samples = samples.len(), "wrote scenario");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    let rate = SAMPLE_RATE as f64;
    let cycle = EnvelopeConfig::from_seconds(0.2, 0.0, 0.2, rate);

    let single = render(cycle, &[0]);
    write_wav(&out_dir.join("single.wav"), &single)?;

    let retriggers = render(cycle.with_max_retriggers(2), &[0]);
    write_wav(&out_dir.join("retriggers.wav"), &retriggers)?;

    // 0.3 s in: a third of the way through decay
    let forced = render(
        cycle.with_forced_decay_seconds(0.005, rate),
        &[0, 103],
    );
    write_wav(&out_dir.join("forced.wav"), &forced)?;

    println!("Rendered scenarios to {}", out_dir.display());
    Ok(())
}
