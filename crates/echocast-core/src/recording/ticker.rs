//! Periodic tick source for the recording timer.
//!
//! Arming spawns one interval task on the current tokio runtime. The task
//! lives exactly as long as its [`TickHandle`]: dropping the handle aborts
//! it, so a controller that lets go of the handle can never receive a
//! tick from that run again.

use std::time::Duration;

use tokio::{
    runtime::Handle,
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, warn};
use uuid::Uuid;

/// Period between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest accepted period. Tokio intervals reject a zero period.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// One time-advance event.
///
/// Tagged with the run that armed it so receivers can discard ticks that
/// were already queued when the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Recording session the tick belongs to.
    pub session_id: Uuid,
    /// Arming generation within that session.
    pub epoch: u64,
}

/// Spawns interval tasks that feed [`Tick`]s into a channel.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    period: Duration,
    tx: mpsc::Sender<Tick>,
}

impl IntervalTicker {
    /// Ticker sending into an existing channel.
    ///
    /// Periods shorter than [`MIN_TICK_INTERVAL`] are raised to it.
    pub fn new(period: Duration, tx: mpsc::Sender<Tick>) -> Self {
        if period < MIN_TICK_INTERVAL {
            warn!(period_ms = period.as_millis(), "Tick period too short, using minimum");
        }

        Self {
            period: period.max(MIN_TICK_INTERVAL),
            tx,
        }
    }

    /// Ticker plus the receiving end of a fresh channel.
    pub fn channel(period: Duration, capacity: usize) -> (Self, mpsc::Receiver<Tick>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(period, tx), rx)
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start emitting `tick` every period, first one a full period from now.
    ///
    /// Returns `None` outside a tokio runtime; the caller then drives the
    /// timer by hand.
    pub fn arm(&self, tick: Tick) -> Option<TickHandle> {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime, tick source not armed");
            return None;
        };

        let tx = self.tx.clone();
        let period = self.period;

        let task = runtime.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            // A late tick must not be followed by a burst of catch-up ticks.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(tick).await.is_err() {
                    break;
                }
            }
        });

        debug!(session_id = %tick.session_id, epoch = tick.epoch, "Tick source armed");

        Some(TickHandle { task, tick })
    }
}

/// Owned, cancel-on-drop reference to an armed tick task.
#[derive(Debug)]
pub struct TickHandle {
    task: JoinHandle<()>,
    tick: Tick,
}

impl TickHandle {
    /// Whether the task has ended (receiver gone or aborted).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
        debug!(
            session_id = %self.tick.session_id,
            epoch = self.tick.epoch,
            "Tick source cancelled"
        );
    }
}
