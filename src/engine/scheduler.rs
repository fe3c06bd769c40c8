use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use rand::{rngs::SmallRng, Rng};
use tracing::trace;

/*
Transient Scheduler
===================

A timer queue driven by an external clock. Nothing here sleeps or spawns: the
owner calls `pop_due(now)` in a loop from its event loop and acts on each
firing.

Every task carries the `LiveFlag` of the sound that scheduled it. The flag is
checked when the task comes due, not when it was scheduled:

    due ──→ flag live? ──no──→ task dropped, never fires again
                │
               yes
                ↓
           fire event ──→ recurring? ──yes──→ re-arm at due + fresh delay

Recurring tasks re-arm relative to their own due time, so a late `pop_due`
yields the same sequence of event times as a punctual one.
*/

/// Shared "this sound is still playing" bit.
#[derive(Debug, Clone)]
pub struct LiveFlag(Arc<AtomicBool>);

impl LiveFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for LiveFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Inclusive range of delays between two firings of a recurring task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Recurrence {
    /// An inverted range is swapped rather than rejected.
    pub const fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        if min_ms <= max_ms {
            Self { min_ms, max_ms }
        } else {
            Self {
                min_ms: max_ms,
                max_ms: min_ms,
            }
        }
    }

    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    /// Draw a delay uniformly from the range.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.random_range(self.min_ms..=self.max_ms))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A task that came due and was live.
#[derive(Debug, Clone, PartialEq)]
pub struct Firing<E> {
    pub handle: TimerHandle,
    /// When the task was due, which may be earlier than `now`.
    pub due: Duration,
    pub event: E,
}

struct Task<E> {
    due: Duration,
    repeat: Option<Recurrence>,
    live: LiveFlag,
    event: E,
}

pub struct TransientScheduler<E> {
    queue: BinaryHeap<Reverse<(Duration, TimerHandle)>>,
    tasks: HashMap<TimerHandle, Task<E>>,
    next_handle: u64,
    rng: SmallRng,
}

impl<E: Clone> TransientScheduler<E> {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            queue: BinaryHeap::new(),
            tasks: HashMap::new(),
            next_handle: 0,
            rng,
        }
    }

    fn insert(
        &mut self,
        due: Duration,
        repeat: Option<Recurrence>,
        live: LiveFlag,
        event: E,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        self.queue.push(Reverse((due, handle)));
        self.tasks.insert(
            handle,
            Task {
                due,
                repeat,
                live,
                event,
            },
        );
        handle
    }

    /// Fire `event` after a random delay from `every`, then again after each
    /// fresh delay, for as long as `live` holds.
    pub fn schedule_recurring(
        &mut self,
        now: Duration,
        every: Recurrence,
        live: LiveFlag,
        event: E,
    ) -> TimerHandle {
        let due = now + every.draw(&mut self.rng);
        self.insert(due, Some(every), live, event)
    }

    /// Fire `event` once at `at`, if `live` still holds then.
    pub fn schedule_once(&mut self, at: Duration, live: LiveFlag, event: E) -> TimerHandle {
        self.insert(at, None, live, event)
    }

    /// Returns `false` if the timer already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        // the queue entry is skipped lazily when it surfaces
        self.tasks.remove(&handle).is_some()
    }

    /// Tasks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.values().map(|task| task.due).min()
    }

    /// Pop the earliest live task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Firing<E>> {
        while let Some(&Reverse((due, handle))) = self.queue.peek() {
            if due > now {
                return None;
            }
            self.queue.pop();

            let Some(task) = self.tasks.get_mut(&handle) else {
                continue;
            };

            if !task.live.is_live() {
                trace!(?handle, "dropping timer of a stopped sound");
                self.tasks.remove(&handle);
                continue;
            }

            let event = task.event.clone();
            let repeat = task.repeat;
            match repeat {
                Some(every) => {
                    task.due = due + every.draw(&mut self.rng);
                    self.queue.push(Reverse((task.due, handle)));
                }
                None => {
                    self.tasks.remove(&handle);
                }
            }

            return Some(Firing { handle, due, event });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn scheduler() -> TransientScheduler<&'static str> {
        TransientScheduler::new(SmallRng::seed_from_u64(11))
    }

    fn drain(
        scheduler: &mut TransientScheduler<&'static str>,
        now: Duration,
    ) -> Vec<Firing<&'static str>> {
        std::iter::from_fn(|| scheduler.pop_due(now)).collect()
    }

    #[test]
    fn recurring_gaps_stay_in_range() {
        let mut scheduler = scheduler();
        let every = Recurrence::from_millis(3_000, 8_000);
        scheduler.schedule_recurring(Duration::ZERO, every, LiveFlag::new(), "chirp");

        let firings = drain(&mut scheduler, Duration::from_secs(600));
        assert!(firings.len() >= 600 / 8);

        let first = firings[0].due;
        assert!(first >= every.min() && first <= every.max());
        for pair in firings.windows(2) {
            let gap = pair[1].due - pair[0].due;
            assert!(gap >= every.min() && gap <= every.max(), "gap {gap:?}");
        }
    }

    #[test]
    fn late_pump_matches_fine_pump() {
        let every = Recurrence::from_millis(500, 1_500);

        let mut coarse = scheduler();
        coarse.schedule_recurring(Duration::ZERO, every, LiveFlag::new(), "cricket");
        let coarse: Vec<_> = drain(&mut coarse, Duration::from_secs(30))
            .into_iter()
            .map(|f| f.due)
            .collect();

        let mut fine = scheduler();
        fine.schedule_recurring(Duration::ZERO, every, LiveFlag::new(), "cricket");
        let mut fine_dues = Vec::new();
        for ms in (0..=30_000).step_by(10) {
            let fired = drain(&mut fine, Duration::from_millis(ms));
            fine_dues.extend(fired.into_iter().map(|f| f.due));
        }

        assert_eq!(coarse, fine_dues);
    }

    #[test]
    fn cleared_flag_stops_recurrence() {
        let mut scheduler = scheduler();
        let live = LiveFlag::new();
        let every = Recurrence::from_millis(100, 200);
        scheduler.schedule_recurring(Duration::ZERO, every, live.clone(), "tick");

        assert!(!drain(&mut scheduler, Duration::from_secs(1)).is_empty());
        live.clear();

        assert!(drain(&mut scheduler, Duration::from_secs(60)).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = scheduler();
        let once = scheduler.schedule_once(Duration::from_millis(50), LiveFlag::new(), "release");
        assert_eq!(scheduler.pending(), 1);

        assert!(scheduler.cancel(once));
        assert!(!scheduler.cancel(once));
        assert!(drain(&mut scheduler, Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn fires_in_due_order() {
        let mut scheduler = scheduler();
        let live = LiveFlag::new();
        scheduler.schedule_once(Duration::from_millis(30), live.clone(), "c");
        scheduler.schedule_once(Duration::from_millis(10), live.clone(), "a");
        scheduler.schedule_once(Duration::from_millis(20), live, "b");

        assert_eq!(scheduler.next_due(), Some(Duration::from_millis(10)));
        let events: Vec<_> = drain(&mut scheduler, Duration::from_millis(25))
            .into_iter()
            .map(|f| f.event)
            .collect();
        assert_eq!(events, vec!["a", "b"]);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn inverted_range_is_swapped() {
        let every = Recurrence::from_millis(8_000, 3_000);
        assert_eq!(every, Recurrence::from_millis(3_000, 8_000));

        let mut rng = SmallRng::seed_from_u64(5);
        let fixed = Recurrence::from_millis(250, 250);
        assert_eq!(fixed.draw(&mut rng), Duration::from_millis(250));
    }
}
