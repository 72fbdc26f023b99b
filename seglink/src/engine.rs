use core::cell::{Cell, RefCell};
use core::task::{Context, Poll};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::waitqueue::WakerRegistration;
use seglink_core::{Event, EventSet};
use seglink_driver::internal::{DynamicEvents, DynamicLink, DynamicNotifier};
use seglink_driver::link::{Link, Notifier};
use seglink_driver::ring::Ring;
use seglink_driver::sink::ByteSink;

use crate::config::Config;
use crate::runner::Runner;

/// Extraction statistics
///
/// Counters wrap on overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stats {
    /// Segments delivered to the sink.
    pub segments: u32,
    /// Bytes delivered to the sink.
    pub bytes: u32,
    /// Segments the sink rejected; their bytes are permanently lost.
    pub dropped_segments: u32,
    /// Wrap or timeout events that carried no new bytes.
    pub spurious_events: u32,
    /// Cursor invariant violations that reset extraction state.
    pub faults: u32,
}

/// Streaming segmentation engine
///
/// Owns the event state shared between interrupt context and the runner task. `split`
/// hands out the interrupt-side `Notifier`, the read-only `Monitor`, and the `Runner`
/// that drives extraction. No process-wide singletons: every handle borrows the engine
/// instance.
pub struct Engine<M: RawMutex, const N: usize> {
    shared: Shared<M>,
    config: Config,
}

impl<M: RawMutex + Sync, const N: usize> Engine<M, N> {
    pub fn new(config: Config) -> Self {
        Self {
            shared: Shared::new(),
            config,
        }
    }

    /// Splits the engine into its handles.
    ///
    /// `ring` is the hardware reception ring, `sink` the segment consumer. The ring
    /// capacity must equal `N`.
    pub fn split<R: Ring, S: ByteSink>(
        &mut self,
        ring: R,
        sink: S,
    ) -> (Notifier<'_>, Monitor<'_>, Runner<'_, M, R, S, N>) {
        assert_eq!(usize::from(ring.capacity()), N);
        let (notifier, events) = Link::new(&self.shared).split();
        let monitor = Monitor(&self.shared);
        let runner = Runner::new(&self.shared, events, ring, sink, self.config);
        (notifier, monitor, runner)
    }
}

/// Event state shared between interrupt context and the runner.
///
/// The pending set replaces the reference design's reliance on interrupt priority
/// equality: notifications only set a bit and wake under a bounded critical section,
/// and the single consumer serializes extraction.
pub(crate) struct Shared<M: RawMutex> {
    link: Mutex<M, RefCell<LinkState>>,
    stats: Mutex<M, Cell<Stats>>,
}

struct LinkState {
    pending: EventSet,
    pop_trigger: WakerRegistration,
}

impl<M: RawMutex> Shared<M> {
    fn new() -> Self {
        Self {
            link: Mutex::new(RefCell::new(LinkState {
                pending: EventSet::NONE,
                pop_trigger: WakerRegistration::new(),
            })),
            stats: Mutex::new(Cell::new(Stats::default())),
        }
    }

    pub(crate) fn update_stats(&self, update: impl FnOnce(&mut Stats)) {
        self.stats.lock(|cell| {
            let mut stats = cell.get();
            update(&mut stats);
            cell.set(stats);
        });
    }
}

impl<M: RawMutex> DynamicNotifier for Shared<M> {
    fn notify(&self, event: Event) {
        self.link.lock(|cell| {
            let mut state = cell.borrow_mut();
            state.pending.insert(event);
            state.pop_trigger.wake();
        });
    }
}

impl<M: RawMutex> DynamicEvents for Shared<M> {
    fn poll_pop(&self, cx: &mut Context<'_>) -> Poll<Event> {
        self.link.lock(|cell| {
            let mut state = cell.borrow_mut();
            if let Some(event) = state.pending.first() {
                state.pending.remove(event);
                Poll::Ready(event)
            } else {
                state.pop_trigger.register(cx.waker());
                Poll::Pending
            }
        })
    }
}

impl<M: RawMutex> DynamicLink for Shared<M> {}

trait DynamicMonitor {
    fn stats(&self) -> Stats;
}

impl<M: RawMutex> DynamicMonitor for Shared<M> {
    fn stats(&self) -> Stats {
        self.stats.lock(|cell| cell.get())
    }
}

/// Read-only statistics handle
pub struct Monitor<'a>(&'a (dyn DynamicMonitor + Sync));

impl<'a> Monitor<'a> {
    pub fn stats(&self) -> Stats {
        self.0.stats()
    }
}
