#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

use embassy_sync::blocking_mutex::raw::RawMutex;
use seglink::Runner;
use seglink_driver::ring::Ring;
use seglink_driver::segment::Segment;
use seglink_driver::sink::{ByteSink, SinkStatus};

static TIME_LOCK: Mutex<()> = Mutex::new(());

/// MockDriver time is process-global; tests that advance it must run one at a time.
pub fn lock_time() -> MutexGuard<'static, ()> {
    TIME_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

pub async fn run_runner<M: RawMutex, R: Ring, S: ByteSink, const N: usize>(
    mut runner: Runner<'static, M, R, S, N>,
) {
    runner.run().await
}

/// Software stand-in for the hardware-written reception ring.
#[derive(Clone)]
pub struct SimRing {
    inner: Rc<RingInner>,
}

struct RingInner {
    capacity: u16,
    data: RefCell<Vec<u8>>,
    remaining: Cell<u16>,
}

impl SimRing {
    pub fn new(capacity: u16) -> Self {
        Self {
            inner: Rc::new(RingInner {
                capacity,
                data: RefCell::new(vec![0; usize::from(capacity)]),
                remaining: Cell::new(capacity),
            }),
        }
    }

    /// Write bytes the way the transfer engine would: advance the cursor one byte at a
    /// time and reload the remaining counter the instant it reaches zero. Returns the
    /// number of wraps produced; the caller delivers each as a notification.
    pub fn feed(&self, bytes: &[u8]) -> u32 {
        let mut wraps = 0;
        for &byte in bytes {
            let cursor = usize::from(self.inner.capacity - self.inner.remaining.get());
            self.inner.data.borrow_mut()[cursor] = byte;
            let next = self.inner.remaining.get() - 1;
            if next == 0 {
                self.inner.remaining.set(self.inner.capacity);
                wraps += 1;
            } else {
                self.inner.remaining.set(next);
            }
        }
        wraps
    }

    /// Pin the remaining counter, simulating a read that catches the register in the
    /// instant before its reload.
    pub fn force_remaining(&self, remaining: u16) {
        self.inner.remaining.set(remaining);
    }
}

impl Ring for SimRing {
    fn capacity(&self) -> u16 {
        self.inner.capacity
    }

    fn remaining(&self) -> u16 {
        self.inner.remaining.get()
    }

    fn read(&self, offset: u16, dst: &mut [u8]) {
        let start = usize::from(offset);
        dst.copy_from_slice(&self.inner.data.borrow()[start..start + dst.len()]);
    }
}

/// Sink that records accepted deliveries and answers with a scripted status.
#[derive(Clone)]
pub struct RecordingSink {
    inner: Rc<SinkInner>,
}

struct SinkInner {
    sent: RefCell<Vec<(u16, Vec<u8>)>>,
    reply: Cell<SinkStatus>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SinkInner {
                sent: RefCell::new(Vec::new()),
                reply: Cell::new(SinkStatus::Accepted),
            }),
        }
    }

    pub fn set_reply(&self, status: SinkStatus) {
        self.inner.reply.set(status);
    }

    /// Accepted segments as `(offset, bytes)`, in delivery order.
    pub fn sent(&self) -> Vec<(u16, Vec<u8>)> {
        self.inner.sent.borrow().clone()
    }

    /// All accepted bytes, concatenated in delivery order.
    pub fn concat(&self) -> Vec<u8> {
        self.inner
            .sent
            .borrow()
            .iter()
            .flat_map(|(_, bytes)| bytes.iter().copied())
            .collect()
    }
}

impl ByteSink for RecordingSink {
    fn send(&mut self, segment: &Segment<'_>) -> SinkStatus {
        let status = self.inner.reply.get();
        if status == SinkStatus::Accepted {
            self.inner
                .sent
                .borrow_mut()
                .push((segment.offset, segment.bytes.to_vec()));
        }
        status
    }
}
