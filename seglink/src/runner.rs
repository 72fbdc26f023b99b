//! Single-consumer extraction dispatch

use core::future::pending;
use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Ticker};
use seglink_core::Event;
use seglink_driver::internal::DynamicNotifier;
use seglink_driver::link::Events;
use seglink_driver::ring::Ring;
use seglink_driver::segment::Segment;
use seglink_driver::sink::{ByteSink, SinkStatus};

use crate::config::Config;
use crate::engine::Shared;
use crate::extractor::Extractor;
use crate::timer::CountdownTimer;

const TICK_PERIOD: Duration = Duration::from_millis(1);

/// Extraction runner.
///
/// Run for proper engine operation. The runner is the single consumer of the event
/// link: it alone applies events to the extraction state, so wrap and timeout handling
/// never interleave, without a lock around either. The millisecond tick source is only
/// polled while a countdown is armed.
pub struct Runner<'a, M: RawMutex, R: Ring, S: ByteSink, const N: usize> {
    shared: &'a Shared<M>,
    events: Events<'a>,
    ring: R,
    sink: S,
    timer: CountdownTimer,
    extractor: Extractor<N>,
    timeout_ms: u16,
}

impl<'a, M: RawMutex, R: Ring, S: ByteSink, const N: usize> Runner<'a, M, R, S, N> {
    pub(crate) fn new(
        shared: &'a Shared<M>,
        events: Events<'a>,
        ring: R,
        sink: S,
        config: Config,
    ) -> Self {
        Self {
            shared,
            events,
            ring,
            sink,
            timer: CountdownTimer::new(),
            extractor: Extractor::new(),
            timeout_ms: unwrap!(u16::try_from(config.timeout.as_millis())),
        }
    }

    pub async fn run(&mut self) -> ! {
        let mut ticker = Ticker::every(TICK_PERIOD);
        loop {
            let result = select(self.events.pop(), async {
                // the tick source only matters while a countdown is armed
                if self.timer.is_armed() {
                    ticker.next().await
                } else {
                    pending().await
                }
            })
            .await;

            match result {
                Either::First(event) => self.dispatch(event, &mut ticker),
                Either::Second(()) => {
                    if self.timer.tick() {
                        // expiry joins the same single-consumer funnel as the
                        // hardware notifications
                        self.shared.notify(Event::Timeout);
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, event: Event, ticker: &mut Ticker) {
        match event {
            Event::IdleDetected => {
                self.timer.arm(self.timeout_ms);
                // align the first tick to the arming instant
                ticker.reset();
            }
            Event::Wrap => {
                // a wrap pre-empts the armed countdown
                self.timer.disarm();
                let segment = self.extractor.on_wrap(&self.ring);
                deliver(self.shared, &mut self.sink, segment);
            }
            Event::Timeout => match self.extractor.on_timeout(&self.ring) {
                Ok(segment) => deliver(self.shared, &mut self.sink, segment),
                Err(_) => {
                    error!("remaining counter above ring capacity, resetting extraction state");
                    self.extractor.reset();
                    self.timer.disarm();
                    self.shared.update_stats(|stats| {
                        stats.faults = stats.faults.wrapping_add(1);
                    });
                }
            },
        }
    }
}

fn deliver<M: RawMutex, S: ByteSink>(
    shared: &Shared<M>,
    sink: &mut S,
    segment: Option<Segment<'_>>,
) {
    let Some(segment) = segment else {
        shared.update_stats(|stats| {
            stats.spurious_events = stats.spurious_events.wrapping_add(1);
        });
        return;
    };

    match sink.send(&segment) {
        SinkStatus::Accepted => shared.update_stats(|stats| {
            stats.segments = stats.segments.wrapping_add(1);
            stats.bytes = stats.bytes.wrapping_add(u32::from(segment.len()));
        }),
        SinkStatus::Busy | SinkStatus::TransportError => {
            // no retry: the cursor has advanced, the bytes are gone
            warn!("sink rejected segment, {} bytes dropped", segment.bytes.len());
            shared.update_stats(|stats| {
                stats.dropped_segments = stats.dropped_segments.wrapping_add(1);
            });
        }
    }
}
