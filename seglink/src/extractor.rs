//! Segment extraction

use seglink_core::{InvalidCursor, Segmenter, Span};
use seglink_driver::ring::Ring;
use seglink_driver::segment::Segment;

/// Copies newly-available ring ranges into a scratch buffer
///
/// Owns the persistent extraction cursor and the scratch buffer segments are handed
/// out of. `N` must equal the hardware ring capacity; segments never cross the wrap
/// boundary, so a single contiguous read per event suffices.
pub(crate) struct Extractor<const N: usize> {
    segmenter: Segmenter,
    scratch: [u8; N],
}

impl<const N: usize> Extractor<N> {
    pub(crate) fn new() -> Self {
        let capacity = unwrap!(u16::try_from(N));
        Self {
            segmenter: unwrap!(Segmenter::new(capacity)),
            scratch: [0; N],
        }
    }

    /// Extracts `[last_end, N)` on a wrap event.
    ///
    /// `None` when a boundary timeout already consumed the whole pass (the spurious
    /// wrap); the cursor is still normalized to the buffer start.
    pub(crate) fn on_wrap(&mut self, ring: &impl Ring) -> Option<Segment<'_>> {
        let span = self.segmenter.on_wrap();
        self.copy_out(ring, span)
    }

    /// Extracts `[last_end, cursor)` on a timeout event.
    ///
    /// `None` when no new bytes arrived since the previous extraction. `Err` when the
    /// ring reports a remaining counter above its capacity; the cursor is left where
    /// it was and the caller decides the recovery.
    pub(crate) fn on_timeout(
        &mut self,
        ring: &impl Ring,
    ) -> Result<Option<Segment<'_>>, InvalidCursor> {
        let span = self.segmenter.on_timeout(ring.remaining())?;
        Ok(self.copy_out(ring, span))
    }

    /// Recovery action: reset extraction state to its initial values.
    pub(crate) fn reset(&mut self) {
        self.segmenter.reset();
    }

    fn copy_out(&mut self, ring: &impl Ring, span: Span) -> Option<Segment<'_>> {
        if span.is_empty() {
            return None;
        }
        let len = usize::from(span.len());
        ring.read(span.start, &mut self.scratch[..len]);
        Some(Segment {
            offset: span.start,
            bytes: &self.scratch[..len],
        })
    }
}
