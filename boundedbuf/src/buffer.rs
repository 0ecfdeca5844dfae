use crate::BufferError;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use tracing::{debug, trace};

#[derive(Debug)]
struct Shared<T> {
    queue: VecDeque<T>,
    closed: bool,
}

/// Fixed-capacity FIFO buffer with blocking push/pop.
///
/// One condition variable per waiter role: `not_full` parks blocked pushes,
/// `not_empty` parks blocked pops. A single shared condition variable with
/// single-target wakeup can wake a same-role waiter when more than one thread
/// waits on each side; per-role condition variables keep each wakeup targeted
/// at the complementary role. The intended regime is still one producer and
/// one consumer.
#[derive(Debug)]
pub struct BoundedBuffer<T> {
    shared: Mutex<Shared<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BoundedBuffer<T> {
    /// Create a buffer holding at most `capacity` items.
    ///
    /// # Errors
    /// Returns [`BufferError::ZeroCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }

        Ok(BoundedBuffer {
            shared: Mutex::new(Shared {
                queue: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    /// Append `item` to the tail, blocking while the buffer is at capacity.
    ///
    /// # Errors
    /// Returns [`BufferError::Closed`] once the buffer has been closed.
    pub fn push(&self, item: T) -> Result<(), BufferError> {
        let mut shared = self.shared.lock().unwrap();

        loop {
            if shared.closed {
                return Err(BufferError::Closed);
            }
            if shared.queue.len() < self.capacity {
                break;
            }
            debug!(capacity = self.capacity, "buffer full, waiting for space");
            shared = self.not_full.wait(shared).unwrap();
        }

        shared.queue.push_back(item);
        debug_assert!(shared.queue.len() <= self.capacity);
        trace!(len = shared.queue.len(), "item enqueued");
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove and return the head item, blocking while the buffer is empty.
    ///
    /// Items already buffered keep draining after a close; [`BufferError::Closed`]
    /// is returned only once the buffer is both closed and empty.
    pub fn pop(&self) -> Result<T, BufferError> {
        let mut shared = self.shared.lock().unwrap();

        loop {
            if let Some(item) = shared.queue.pop_front() {
                trace!(len = shared.queue.len(), "item dequeued");
                self.not_full.notify_one();
                return Ok(item);
            }
            if shared.closed {
                return Err(BufferError::Closed);
            }
            debug!("buffer empty, waiting for items");
            shared = self.not_empty.wait(shared).unwrap();
        }
    }

    /// Non-blocking push. Returns the item back when the buffer is at
    /// capacity or closed.
    pub fn try_push(&self, item: T) -> Result<(), T> {
        let mut shared = self.shared.lock().unwrap();

        if shared.closed || shared.queue.len() == self.capacity {
            return Err(item);
        }

        shared.queue.push_back(item);
        debug_assert!(shared.queue.len() <= self.capacity);
        trace!(len = shared.queue.len(), "item enqueued");
        self.not_empty.notify_one();
        Ok(())
    }

    /// Non-blocking pop.
    pub fn try_pop(&self) -> Option<T> {
        let mut shared = self.shared.lock().unwrap();

        let item = shared.queue.pop_front();
        if item.is_some() {
            trace!(len = shared.queue.len(), "item dequeued");
            self.not_full.notify_one();
        }
        item
    }

    /// Close the buffer, waking every blocked push and pop.
    ///
    /// Blocked calls return [`BufferError::Closed`]; callers decide whether to
    /// retry or abort. Idempotent.
    pub fn close(&self) {
        let mut shared = self.shared.lock().unwrap();
        if !shared.closed {
            shared.closed = true;
            debug!(len = shared.queue.len(), "buffer closed");
            self.not_full.notify_all();
            self.not_empty.notify_all();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().unwrap().closed
    }

    /// Number of buffered items. A snapshot, valid only at the instant of the
    /// call; push/pop decisions must rely on the internal guarded checks.
    pub fn len(&self) -> usize {
        self.shared.lock().unwrap().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
