use boundedbuf::{BoundedBuffer, BufferError};
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Producer side of a run: draws random values and pushes them into the
/// shared buffer.
pub struct Producer {
    buffer: Arc<BoundedBuffer<i32>>,
    value_bound: i32,
    pace: Option<Duration>,
}

impl Producer {
    pub fn new(
        buffer: Arc<BoundedBuffer<i32>>,
        value_bound: i32,
        pace: Option<Duration>,
    ) -> Self {
        Producer {
            buffer,
            value_bound,
            pace,
        }
    }

    /// Produce `count` values, returning them in insertion order.
    ///
    /// Stops early with [`BufferError::Closed`] when the buffer is closed
    /// while a push is blocked; the caller decides whether that ends the run.
    pub fn run(&self, count: u64) -> Result<Vec<i32>, BufferError> {
        let mut rng = rand::thread_rng();
        let mut produced = Vec::with_capacity(count as usize);

        for seq in 0..count {
            let value = rng.gen_range(0..self.value_bound);
            self.buffer.push(value)?;
            info!(value = value, seq = seq, "produced");
            produced.push(value);

            if let Some(pace) = self.pace {
                thread::sleep(pace);
            }
        }

        debug!(count = produced.len(), "producer finished");
        Ok(produced)
    }
}

/// Consumer side of a run: pops values from the shared buffer.
pub struct Consumer {
    buffer: Arc<BoundedBuffer<i32>>,
    pace: Option<Duration>,
}

impl Consumer {
    pub fn new(buffer: Arc<BoundedBuffer<i32>>, pace: Option<Duration>) -> Self {
        Consumer { buffer, pace }
    }

    /// Consume `count` values, returning them in removal order.
    pub fn run(&self, count: u64) -> Result<Vec<i32>, BufferError> {
        let mut consumed = Vec::with_capacity(count as usize);

        for seq in 0..count {
            let value = self.buffer.pop()?;
            info!(value = value, seq = seq, "consumed");
            consumed.push(value);

            if let Some(pace) = self.pace {
                thread::sleep(pace);
            }
        }

        debug!(count = consumed.len(), "consumer finished");
        Ok(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::time::Duration;

    #[fixture]
    fn buffer() -> Arc<BoundedBuffer<i32>> {
        Arc::new(BoundedBuffer::new(10).unwrap())
    }

    #[rstest]
    fn test_twenty_item_run(buffer: Arc<BoundedBuffer<i32>>) {
        let num_items = 20;

        let producer = Producer::new(buffer.clone(), 100, None);
        let producer_handle = thread::spawn(move || producer.run(num_items));

        let consumer = Consumer::new(buffer.clone(), None);
        let consumer_handle = thread::spawn(move || consumer.run(num_items));

        let produced = producer_handle
            .join()
            .expect("producer thread panicked")
            .unwrap();
        let consumed = consumer_handle
            .join()
            .expect("consumer thread panicked")
            .unwrap();

        assert_eq!(produced.len(), 20);
        assert_eq!(consumed, produced);
        assert!(produced.iter().all(|&v| (0..100).contains(&v)));
        assert_eq!(buffer.len(), 0);
    }

    #[rstest]
    fn test_paced_producer_keeps_order() {
        let buffer = Arc::new(BoundedBuffer::new(1).unwrap());
        let num_items = 5;

        let producer = Producer::new(buffer.clone(), 10, Some(Duration::from_millis(1)));
        let producer_handle = thread::spawn(move || producer.run(num_items));

        let consumer = Consumer::new(buffer.clone(), None);
        let consumed = consumer.run(num_items).unwrap();

        let produced = producer_handle
            .join()
            .expect("producer thread panicked")
            .unwrap();
        assert_eq!(consumed, produced);
    }

    #[rstest]
    fn test_close_cancels_blocked_consumer(buffer: Arc<BoundedBuffer<i32>>) {
        let consumer = Consumer::new(buffer.clone(), None);
        let consumer_handle = thread::spawn(move || consumer.run(1));

        thread::sleep(Duration::from_millis(50));
        buffer.close();

        let result = consumer_handle.join().expect("consumer thread panicked");
        assert_eq!(result, Err(BufferError::Closed));
    }

    #[rstest]
    fn test_close_cancels_blocked_producer() {
        let buffer = Arc::new(BoundedBuffer::new(2).unwrap());

        let producer = Producer::new(buffer.clone(), 100, None);
        let producer_handle = thread::spawn(move || producer.run(5));

        thread::sleep(Duration::from_millis(50));
        assert_eq!(buffer.len(), 2);
        buffer.close();

        let result = producer_handle.join().expect("producer thread panicked");
        assert_eq!(result, Err(BufferError::Closed));
    }
}
