//! Bounded blocking queues for pipeline flow control.
//!
//! [`BoundedQueue`] is the only channel between pipeline stages: the reader
//! pushes into the line queue, parser workers pop from it and push into the
//! record queue, and the writer pops from that. Capacity is fixed at
//! construction; a full queue suspends producers and an empty queue suspends
//! consumers, which is the only backpressure mechanism the pipeline uses.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

/// A multi-producer/multi-consumer FIFO channel with a fixed capacity.
///
/// `push` blocks while the queue is full and `pop` blocks while it is empty;
/// the queue never rejects an item. FIFO order holds per queue: items from a
/// single producer are observed in the order that producer pushed them, while
/// the interleaving between producers is whatever the schedule produced.
pub struct BoundedQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: usize,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-capacity queue could never accept
    /// an item and every producer would block forever.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be at least 1");
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Enqueue an item, waiting while the queue is at capacity.
    pub fn push(&self, item: T) {
        let mut items = self.items.lock();
        while items.len() >= self.capacity {
            self.not_full.wait(&mut items);
        }
        items.push_back(item);
        drop(items);
        self.not_empty.notify_one();
    }

    /// Dequeue the oldest item, waiting while the queue is empty.
    pub fn pop(&self) -> T {
        let mut items = self.items.lock();
        loop {
            if let Some(item) = items.pop_front() {
                drop(items);
                self.not_full.notify_one();
                return item;
            }
            self.not_empty.wait(&mut items);
        }
    }

    /// Dequeue the oldest item without waiting.
    ///
    /// The pipeline itself relies only on the blocking operations; this is
    /// used by the orchestrator's failure path to drain a queue whose
    /// consumers have already exited.
    pub fn try_pop(&self) -> Option<T> {
        let item = self.items.lock().pop_front();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Number of items currently queued.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// The fixed capacity this queue was created with.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
