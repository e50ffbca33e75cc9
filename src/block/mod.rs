//! Fixed-size sample blocks and the stream they travel through.
//!
//! The audio graph hands the envelope one `AudioBlock` per tick through a
//! `BlockStream`. Blocks come from a pre-allocated `BlockPool`, so rendering
//! never allocates.

mod pool;
mod queue;

pub use pool::BlockPool;
pub use queue::BlockQueue;

use crate::source::SampleSource;

/// Samples per block.
pub const BLOCK_SAMPLES: usize = 128;

/// One block of signed 16-bit mono samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBlock {
    data: [i16; BLOCK_SAMPLES],
}

impl AudioBlock {
    /// Creates a silent block.
    pub fn new() -> Self {
        Self {
            data: [0; BLOCK_SAMPLES],
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.data
    }

    pub fn samples_mut(&mut self) -> &mut [i16] {
        &mut self.data
    }

    /// Overwrites the block with the next samples from `source`.
    pub fn fill_from<S: SampleSource + ?Sized>(&mut self, source: &mut S) {
        source.fill(&mut self.data);
    }
}

impl Default for AudioBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a block processor gets its blocks and where it sends them.
///
/// Mirrors an audio graph's per-tick contract: take a writable block (or
/// nothing, in which case the tick is skipped), optionally pass it
/// downstream, then give it back.
pub trait BlockStream {
    /// Takes the next block to process, if one is available.
    fn receive_writable(&mut self) -> Option<Box<AudioBlock>>;

    /// Passes a processed block downstream.
    fn transmit(&mut self, block: &AudioBlock);

    /// Returns a block once the processor is done with it.
    fn release(&mut self, block: Box<AudioBlock>);
}
