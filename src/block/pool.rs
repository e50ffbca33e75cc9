//! Pre-allocated pool of audio blocks.

use super::AudioBlock;
use crossbeam_queue::ArrayQueue;
use tracing::warn;

/// Lock-free, fixed-capacity pool of `AudioBlock`s.
///
/// All blocks are allocated up front. `acquire` never allocates: an empty
/// pool returns `None`, and the caller skips that tick.
///
/// # Examples
///
/// ```
/// use envshaper::BlockPool;
///
/// let pool = BlockPool::new(2);
/// let a = pool.acquire().unwrap();
/// let b = pool.acquire().unwrap();
/// assert!(pool.acquire().is_none());
///
/// pool.release(a);
/// pool.release(b);
/// assert_eq!(pool.available(), 2);
/// ```
#[derive(Debug)]
pub struct BlockPool {
    free_blocks: ArrayQueue<Box<AudioBlock>>,
}

impl BlockPool {
    /// Creates a pool holding `capacity` silent blocks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        let free_blocks = ArrayQueue::new(capacity);
        for _ in 0..capacity {
            // Cannot fail: exactly `capacity` pushes into an empty queue
            let _ = free_blocks.push(Box::new(AudioBlock::new()));
        }
        Self { free_blocks }
    }

    /// Takes a block, or `None` if all are in use.
    pub fn acquire(&self) -> Option<Box<AudioBlock>> {
        self.free_blocks.pop()
    }

    /// Returns a block to the pool.
    ///
    /// A block that does not fit (the pool is already full, so it came from
    /// elsewhere) is dropped.
    pub fn release(&self, block: Box<AudioBlock>) {
        if self.free_blocks.push(block).is_err() {
            warn!("block released into a full pool, dropping it");
        }
    }

    /// Blocks currently free.
    pub fn available(&self) -> usize {
        self.free_blocks.len()
    }

    /// Total blocks the pool was created with.
    pub fn capacity(&self) -> usize {
        self.free_blocks.capacity()
    }
}
