//! # Buffer Pool
//!
//! Object pool of reusable encode buffers for callers serializing many
//! messages, so the per-message `BytesMut` allocation drops out of the hot
//! path.
//!
//! ## Usage
//! ```rust
//! use wire_protocol::utils::buffer_pool::BufferPool;
//! use wire_protocol::WireWriter;
//!
//! let pool = BufferPool::new(16);
//! let mut buf = pool.acquire();
//! buf.resize(64, 0);
//! let mut writer = WireWriter::new(&mut buf);
//! writer.write_i32(7);
//! // buffer returns to the pool, cleared, on drop
//! ```

use bytes::BytesMut;
use std::sync::{Arc, Mutex};

/// Buffers above this capacity are dropped instead of pooled (64KB)
const MAX_POOLED_BUFFER_SIZE: usize = 64 * 1024;

/// Default buffer capacity, sized for typical protocol messages
const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// A pooled buffer that returns itself to the pool when dropped
pub struct PooledBuffer {
    buffer: BytesMut,
    pool: Arc<Mutex<Vec<BytesMut>>>,
}

impl PooledBuffer {
    /// Get the underlying buffer, consuming this wrapper
    pub fn into_inner(mut self) -> BytesMut {
        std::mem::take(&mut self.buffer)
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        // Return buffer to pool if it's not too large
        if self.buffer.capacity() <= MAX_POOLED_BUFFER_SIZE {
            self.buffer.clear(); // Clear data but keep capacity
            if let Ok(mut pool) = self.pool.lock() {
                pool.push(std::mem::take(&mut self.buffer));
            }
        }
        // Otherwise, let it be deallocated
    }
}

impl std::ops::Deref for PooledBuffer {
    type Target = BytesMut;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl std::ops::DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

/// Thread-safe pool of encode buffers
pub struct BufferPool {
    pool: Arc<Mutex<Vec<BytesMut>>>,
    initial_capacity: usize,
}

impl BufferPool {
    /// Create a new buffer pool with specified initial pool size
    pub fn new(pool_size: usize) -> Self {
        let mut pool = Vec::with_capacity(pool_size);

        // Pre-allocate buffers
        for _ in 0..pool_size {
            pool.push(BytesMut::with_capacity(DEFAULT_BUFFER_CAPACITY));
        }

        Self {
            pool: Arc::new(Mutex::new(pool)),
            initial_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    /// Acquire a buffer from the pool (or allocate a new one if pool is empty)
    pub fn acquire(&self) -> PooledBuffer {
        let buffer = if let Ok(mut pool) = self.pool.lock() {
            pool.pop()
                .unwrap_or_else(|| BytesMut::with_capacity(self.initial_capacity))
        } else {
            BytesMut::with_capacity(self.initial_capacity)
        };

        PooledBuffer {
            buffer,
            pool: self.pool.clone(),
        }
    }

    /// Get the current number of available buffers in the pool
    pub fn available(&self) -> usize {
        self.pool.lock().map(|p| p.len()).unwrap_or(0)
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Clone for BufferPool {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            initial_capacity: self.initial_capacity,
        }
    }
}
