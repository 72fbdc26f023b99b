//! Seglink driver interface
//!
//! The crate provides an interface between a reception-ring hardware driver and the
//! Seglink engine. Limited scope facilitates compatibility across versions.
//! Driver crates should depend on this crate. Seglink engine users should depend on
//! the `seglink` crate instead.
//!
//! A driver integration touches three seams:
//! * `Notifier` consumes wrap and idle-line notifications from interrupt context
//! * `Ring` exposes the hardware-maintained remaining counter and buffer reads
//! * `ByteSink` consumes extracted segments
//!
//! Unlike stacks that poll their peripherals, Seglink relies on the hardware driver to
//! push notifications the instant they occur: the ring keeps overwriting itself whether
//! or not software keeps up, so a wrap notification delivered late is a wrap
//! notification delivered with less of the buffer still intact. Notifier calls are
//! fire-and-forget and never block, which makes them safe in the tightest interrupt
//! contexts; a notification of a kind that is already pending coalesces with it, the
//! same way a hardware pending flag would.
//!
//! The ring is strictly read-only for the engine. Its `remaining` counter is maintained
//! by the transfer hardware and the engine derives the write cursor from it at event
//! processing time, never from the notification itself.
//!
//! The sink boundary is synchronous and lossy by contract: a sink that cannot take a
//! segment right now answers `Busy` and the segment is gone. Sinks that need delivery
//! guarantees must provide them behind this interface.

#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod internal;
pub mod link;
pub mod ring;
pub mod segment;
pub mod sink;

pub mod time {
    pub use embassy_time::{Duration, Instant};
}
