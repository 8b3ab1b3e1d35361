//! The wall-clock workout timer.
//!
//! The displayed duration is always derived from `now - start_time`, never
//! from summing tick intervals, so delayed or missed ticks cause no drift.

use chrono::Duration;
use futures_util::StreamExt;
use futures_util::future::{AbortHandle, Abortable};
use gloo_timers::future::IntervalStream;
use wasm_bindgen_futures::spawn_local;

pub const TICK_INTERVAL_MS: u32 = 1000;

/// Elapsed time as whole minutes and seconds, e.g. `12min 5sec`.
/// Negative durations are clamped to zero.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    format!("{}min {}sec", total_seconds / 60, total_seconds % 60)
}

/// Calls the given callback once per second until stopped or dropped.
///
/// Stopping aborts the underlying task, no tick can be delivered afterwards.
pub struct Ticker {
    handle: Option<AbortHandle>,
}

impl Ticker {
    pub fn start(mut on_tick: impl FnMut() + 'static) -> Self {
        let (handle, registration) = AbortHandle::new_pair();
        spawn_local(async move {
            let ticks = Abortable::new(
                async move {
                    let mut interval = IntervalStream::new(TICK_INTERVAL_MS);
                    loop {
                        interval.next().await;
                        on_tick();
                    }
                },
                registration,
            );
            let _ = ticks.await;
        });
        Self {
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
