//! # Seglink
//!
//! This library reconstructs variable-length data frames from a fixed-capacity circular
//! reception buffer that transfer hardware overwrites continuously, without software
//! intervention. It turns two asynchronously-firing notifications, "buffer wrapped"
//! and "input line idle", into an exact, gap-free, duplicate-free partition of every
//! byte the hardware wrote, using O(1) state and no dynamic memory allocation.
//!
//! The library primarily targets the Embassy async framework and keeps all critical
//! section durations bounded, making the notification entry points safe to call from
//! interrupt handlers.
//!
//! ## Architecture
//!
//! ```text
//!  wrap ISR ──┐                  ┌────────┐
//!             ├─► Notifier ────► │ Engine │ ◄── Monitor
//!  idle ISR ──┘   (pending set)  └───┬────┘
//!                                    ▼
//!                               ┌────────┐   ┌───────────┐
//!              1 ms tick ─────► │ Runner │──►│ Extractor │
//!              (countdown)      └───┬────┘   └─────┬─────┘
//!                                   │              │ reads
//!                                   ▼              ▼
//!                               ByteSink      Ring (hardware)
//! ```
//!
//! Components:
//! * _Engine_ owns the event state shared between interrupt context and the runner:
//!   the pending-event set, its waker, and the statistics counters. `split` hands out
//!   the other handles; nothing is a global.
//! * _Notifier_ is the interrupt-side handle: wrap and idle-line notifications set a
//!   pending bit and wake the runner, nothing more.
//! * _Runner_ is the single consumer of pending events. It arms the idle countdown,
//!   drives it from a millisecond ticker, and funnels countdown expiry through the
//!   same event set, so extraction is serialized by construction rather than by
//!   interrupt priority.
//! * _Extractor_ derives the write cursor from the ring's remaining counter, computes
//!   the newly-available range, and copies it into its scratch buffer.
//! * _Ring_ and _ByteSink_ are the hardware seams, defined in `seglink-driver`.
//! * _Monitor_ exposes the delivery and loss counters.
//!
//! Delivery is intentionally lossy at the sink boundary: a busy sink costs the
//! segment, it never stalls extraction. The loss is counted, not hidden.

#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
mod engine;
mod extractor;
mod runner;
mod timer;

pub use config::Config;
pub use engine::{Engine, Monitor, Stats};
pub use runner::Runner;

pub mod core {
    pub use seglink_core::*;
}

pub mod time {
    pub use embassy_time::{Duration, Instant};
}
