/// Private interfaces for the Seglink engine
///
/// Drivers should not use this module.
/// Backward-incompatible changes can be made without major version bump.
use core::task::{Context, Poll};
use seglink_core::Event;

pub trait DynamicNotifier {
    fn notify(&self, event: Event);
}

pub trait DynamicEvents {
    fn poll_pop(&self, cx: &mut Context<'_>) -> Poll<Event>;
}

pub trait DynamicLink: DynamicNotifier + DynamicEvents {}
