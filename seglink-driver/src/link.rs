//! Channels connecting hardware notifications and the Seglink engine

use core::future::poll_fn;
use seglink_core::Event;

use crate::internal;

/// Producer of extraction-driving notifications
///
/// Safe to call from interrupt context: both methods only mark the event pending and
/// wake the engine; neither blocks, allocates, or takes more than a bounded critical
/// section. A notification of a kind that is already pending coalesces with it; the
/// engine processes deferred notifications once each, never interleaved.
///
/// `Copy` so that separate interrupt handlers (the ring's wrap vector and the
/// idle-line vector) can each hold a handle.
#[derive(Clone, Copy)]
pub struct Notifier<'a>(&'a (dyn internal::DynamicNotifier + Sync));

impl<'a> Notifier<'a> {
    /// Signal that the ring write cursor completed a full pass and reloaded.
    pub fn wrap(&self) {
        self.0.notify(Event::Wrap);
    }

    /// Signal that the input line went idle; (re)arms the idle countdown.
    pub fn idle_detected(&self) {
        self.0.notify(Event::IdleDetected);
    }
}

/// Consumer of pending events
///
/// Only the engine runner pops events, which is what serializes extraction without a
/// lock around it. Events are delivered in dispatch precedence order (wrap before
/// timeout before idle), not arrival order; see `seglink_core::Event`.
pub struct Events<'a>(&'a (dyn internal::DynamicEvents + Sync));

impl<'a> Events<'a> {
    /// Asynchronously fetches the next pending event. Safe to drop.
    pub async fn pop(&mut self) -> Event {
        poll_fn(|cx| self.0.poll_pop(cx)).await
    }
}

/// Channel container. The engine splits it into its two sides.
pub struct Link<'a>(&'a (dyn internal::DynamicLink + Sync));

impl<'a> Link<'a> {
    pub fn new(access: &'a (dyn internal::DynamicLink + Sync)) -> Self {
        Self(access)
    }

    pub fn split(self) -> (Notifier<'a>, Events<'a>) {
        (Notifier(self.0), Events(self.0))
    }
}
