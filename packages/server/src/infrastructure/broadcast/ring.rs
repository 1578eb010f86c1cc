//! Ring-buffer broadcast queue.
//!
//! A single write counter `idx` grows forever; slot `idx % capacity` is
//! overwritten on wraparound. Every cursor keeps its own `last` counter
//! (`last <= idx`). A cursor more than `capacity` behind has lost data: it is
//! moved forward to `idx` and told it lagged. Producers never wait for slow
//! consumers.

use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::{
    Broadcaster, ReceiveError, Subscription, broadcast::QueueError,
};

struct RingState<T> {
    /// Total number of values ever published
    idx: u64,
    /// Grows up to `capacity` and is then overwritten in place
    slots: Vec<T>,
}

struct Shared<T> {
    capacity: u64,
    state: Mutex<RingState<T>>,
    notify: Notify,
    subscribers: AtomicUsize,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, RingState<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Multi-producer, multi-consumer broadcast queue backed by a ring buffer
pub struct RingBroadcastQueue<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + 'static> RingBroadcastQueue<T> {
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }

        Ok(Self {
            shared: Arc::new(Shared {
                capacity: capacity as u64,
                state: Mutex::new(RingState {
                    idx: 0,
                    slots: Vec::new(),
                }),
                notify: Notify::new(),
                subscribers: AtomicUsize::new(0),
            }),
        })
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity as usize
    }

    pub fn publish(&self, value: T) {
        {
            let mut state = self.shared.lock();
            let slot = (state.idx % self.shared.capacity) as usize;
            if slot == state.slots.len() {
                state.slots.push(value);
            } else {
                state.slots[slot] = value;
            }
            state.idx += 1;
        }
        // Waiters register before re-checking `idx`, so none can miss this.
        self.shared.notify.notify_waiters();
    }

    pub fn subscribe(&self) -> RingCursor<T> {
        let last = self.shared.lock().idx;
        self.shared.subscribers.fetch_add(1, Ordering::Relaxed);
        RingCursor {
            shared: Arc::clone(&self.shared),
            last,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Broadcaster<T> for RingBroadcastQueue<T> {
    fn publish(&self, value: T) {
        RingBroadcastQueue::publish(self, value);
    }

    fn subscribe(&self) -> Box<dyn Subscription<T>> {
        Box::new(RingBroadcastQueue::subscribe(self))
    }

    fn subscriber_count(&self) -> usize {
        self.shared.subscribers.load(Ordering::Relaxed)
    }
}

/// Read position of one subscriber
pub struct RingCursor<T> {
    shared: Arc<Shared<T>>,
    last: u64,
}

impl<T: Clone + Send + 'static> RingCursor<T> {
    pub async fn receive(&mut self) -> Result<T, ReceiveError> {
        loop {
            let notified = self.shared.notify.notified();
            {
                let state = self.shared.lock();
                if let Some(result) = take_next(&mut self.last, self.shared.capacity, &state) {
                    return result;
                }
            }
            notified.await;
        }
    }
}

fn take_next<T: Clone>(
    last: &mut u64,
    capacity: u64,
    state: &RingState<T>,
) -> Option<Result<T, ReceiveError>> {
    let behind = state.idx - *last;
    if behind == 0 {
        return None;
    }

    if behind > capacity {
        *last = state.idx;
        return Some(Err(ReceiveError::Lagged { skipped: behind }));
    }

    let value = state.slots[(*last % capacity) as usize].clone();
    *last += 1;
    Some(Ok(value))
}

impl<T> Drop for RingCursor<T> {
    fn drop(&mut self) {
        self.shared.subscribers.fetch_sub(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Subscription<T> for RingCursor<T> {
    async fn receive(&mut self) -> Result<T, ReceiveError> {
        RingCursor::receive(self).await
    }
}
