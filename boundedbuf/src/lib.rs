//! # boundedbuf - Blocking Bounded FIFO Buffer
//!
//! Fixed-capacity FIFO buffer shared between a producer thread and a consumer
//! thread, with blocking semantics on the full and empty conditions.
//!
//! A mutex guards the queue and a pair of condition variables (one per waiter
//! role) provide the blocking: [`BoundedBuffer::push`] suspends while the
//! buffer is at capacity, [`BoundedBuffer::pop`] suspends while it is empty.
//! Both re-check their predicate in a loop after every wake, so spurious
//! wake-ups are harmless.
//!
//! ## Creating a Buffer
//!
//! ```rust
//! use boundedbuf::BoundedBuffer;
//!
//! let buffer = BoundedBuffer::new(10)?;
//! buffer.push(42)?;
//! assert_eq!(buffer.pop()?, 42);
//! # Ok::<(), boundedbuf::BufferError>(())
//! ```
//!
//! Capacity must be greater than zero.
//!
//! ## Sharing Between Threads
//!
//! The buffer is constructed once and handed to both sides behind an `Arc`:
//!
//! ```rust
//! use boundedbuf::BoundedBuffer;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let buffer = Arc::new(BoundedBuffer::new(4)?);
//!
//! let tx = buffer.clone();
//! let producer = thread::spawn(move || {
//!     for i in 0..16 {
//!         tx.push(i).unwrap();
//!     }
//! });
//!
//! let rx = buffer.clone();
//! let consumer = thread::spawn(move || {
//!     for i in 0..16 {
//!         assert_eq!(rx.pop().unwrap(), i);
//!     }
//! });
//!
//! producer.join().unwrap();
//! consumer.join().unwrap();
//! assert!(buffer.is_empty());
//! # Ok::<(), boundedbuf::BufferError>(())
//! ```
//!
//! ## Cancellation
//!
//! [`BoundedBuffer::close`] wakes every blocked call, which then returns
//! [`BufferError::Closed`] instead of retrying. Items already in the buffer
//! keep draining through [`BoundedBuffer::pop`] after a close.
//!
//! ```rust
//! use boundedbuf::{BoundedBuffer, BufferError};
//!
//! let buffer = BoundedBuffer::new(2)?;
//! buffer.push(1)?;
//! buffer.close();
//!
//! assert_eq!(buffer.pop()?, 1);
//! assert_eq!(buffer.pop(), Err(BufferError::Closed));
//! # Ok::<(), boundedbuf::BufferError>(())
//! ```

pub use buffer::BoundedBuffer;
pub use error::BufferError;

pub mod buffer;
pub mod error;
