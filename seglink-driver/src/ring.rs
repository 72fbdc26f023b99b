//! Reception ring interface

/// Hardware-written circular reception buffer
///
/// An external transfer engine writes bytes at an advancing cursor and wraps to offset
/// zero on overflow, continuously, without software intervention. The Seglink engine
/// never writes the ring; it derives the cursor from the remaining counter and copies
/// stable ranges out.
///
/// Contract for implementations:
/// * `remaining` starts at `capacity`, decrements by one per byte written, and reloads
///   to `capacity` the instant it reaches zero. `0 <= remaining <= capacity` always;
///   a momentary `0` read is valid when the caller catches the counter in the instant
///   before its reload.
/// * A wrap notification must reach `Notifier::wrap` on every reload, before the
///   cursor can pass the previous extraction position a second time.
/// * `capacity` is constant for the ring lifetime and must equal the engine's
///   compile-time ring capacity.
pub trait Ring {
    /// Ring capacity in bytes.
    fn capacity(&self) -> u16;

    /// Hardware-maintained count of bytes until the next wrap.
    fn remaining(&self) -> u16;

    /// Copy `dst.len()` bytes starting at ring offset `offset` into `dst`.
    ///
    /// The caller guarantees `offset + dst.len() <= capacity`; the requested range
    /// never crosses the wrap boundary.
    fn read(&self, offset: u16, dst: &mut [u8]);
}
