//! In-memory block stream for offline rendering and tests.

use super::{AudioBlock, BlockPool, BlockStream};
use crate::source::SampleSource;
use std::collections::VecDeque;
use std::sync::Arc;

/// A `BlockStream` backed by a queue of input blocks and a growing output
/// buffer.
///
/// Input blocks are drawn from a shared `BlockPool` and filled from a
/// `SampleSource`. Transmitted blocks are appended to `output()`; released
/// blocks go back to the pool.
///
/// # Examples
///
/// ```
/// use envshaper::{
///     BlockPool, BlockQueue, ConstantSource, EnvelopeConfig, ShapedEnvelope, BLOCK_SAMPLES,
/// };
/// use std::sync::Arc;
///
/// let pool = Arc::new(BlockPool::new(4));
/// let mut stream = BlockQueue::new(pool.clone());
/// let mut source = ConstantSource::new(1000);
///
/// let mut env = ShapedEnvelope::new(EnvelopeConfig::new(64, 0, 64));
/// env.note_on();
///
/// stream.push_from(&mut source);
/// env.update(&mut stream);
///
/// assert_eq!(stream.output().len(), BLOCK_SAMPLES);
/// assert_eq!(pool.available(), 4);
/// ```
#[derive(Debug)]
pub struct BlockQueue {
    pool: Arc<BlockPool>,
    input: VecDeque<Box<AudioBlock>>,
    output: Vec<i16>,
    transmitted: usize,
    released: usize,
}

impl BlockQueue {
    pub fn new(pool: Arc<BlockPool>) -> Self {
        Self {
            pool,
            input: VecDeque::new(),
            output: Vec::new(),
            transmitted: 0,
            released: 0,
        }
    }

    /// Queues one input block filled from `source`.
    ///
    /// Returns `false` without consuming samples if the pool is exhausted.
    pub fn push_from<S: SampleSource + ?Sized>(&mut self, source: &mut S) -> bool {
        match self.pool.acquire() {
            Some(mut block) => {
                block.fill_from(source);
                self.input.push_back(block);
                true
            }
            None => false,
        }
    }

    /// Input blocks waiting to be processed.
    pub fn pending(&self) -> usize {
        self.input.len()
    }

    /// Every transmitted sample, in order.
    pub fn output(&self) -> &[i16] {
        &self.output
    }

    /// Takes the transmitted samples, leaving the output empty.
    pub fn take_output(&mut self) -> Vec<i16> {
        std::mem::take(&mut self.output)
    }

    /// Blocks transmitted so far.
    pub fn transmitted(&self) -> usize {
        self.transmitted
    }

    /// Blocks released so far.
    pub fn released(&self) -> usize {
        self.released
    }
}

impl BlockStream for BlockQueue {
    fn receive_writable(&mut self) -> Option<Box<AudioBlock>> {
        self.input.pop_front()
    }

    fn transmit(&mut self, block: &AudioBlock) {
        self.output.extend_from_slice(block.samples());
        self.transmitted += 1;
    }

    fn release(&mut self, block: Box<AudioBlock>) {
        self.pool.release(block);
        self.released += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BLOCK_SAMPLES;
    use crate::source::ConstantSource;

    #[test]
    fn test_push_until_pool_empty() {
        let pool = Arc::new(BlockPool::new(2));
        let mut queue = BlockQueue::new(pool);
        let mut source = ConstantSource::new(5);

        assert!(queue.push_from(&mut source));
        assert!(queue.push_from(&mut source));
        assert!(!queue.push_from(&mut source));
        assert_eq!(queue.pending(), 2);
    }

    #[test]
    fn test_transmit_and_release() {
        let pool = Arc::new(BlockPool::new(1));
        let mut queue = BlockQueue::new(pool.clone());
        queue.push_from(&mut ConstantSource::new(-7));

        let block = queue.receive_writable().unwrap();
        assert!(block.samples().iter().all(|&s| s == -7));
        queue.transmit(&block);
        queue.release(block);

        assert_eq!(queue.output().len(), BLOCK_SAMPLES);
        assert_eq!(queue.transmitted(), 1);
        assert_eq!(queue.released(), 1);
        assert_eq!(pool.available(), 1);
        assert!(queue.receive_writable().is_none());
    }

    #[test]
    fn test_take_output() {
        let pool = Arc::new(BlockPool::new(1));
        let mut queue = BlockQueue::new(pool);
        queue.push_from(&mut ConstantSource::new(1));
        let block = queue.receive_writable().unwrap();
        queue.transmit(&block);
        queue.release(block);

        assert_eq!(queue.take_output().len(), BLOCK_SAMPLES);
        assert!(queue.output().is_empty());
    }
}
