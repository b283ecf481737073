use crate::clock::Timestamp;
use crate::config::MAX_ADVANCE_MS;
use crate::food::FoodKind;

/// Work item produced by one cadence firing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickEvent {
    /// Drop items that outlived their lifetime.
    Expire,
    /// Advance the snake one cell.
    Move,
    /// Place one new item of the given kind.
    Spawn(FoodKind),
}

impl TickEvent {
    /// Order of events due at the same instant: expiry first, so a stale item
    /// cannot be eaten, and spawning last, so it sees the moved snake.
    fn priority(self) -> u8 {
        match self {
            Self::Expire => 0,
            Self::Move => 1,
            Self::Spawn(FoodKind::Food) => 2,
            Self::Spawn(FoodKind::Poison) => 3,
        }
    }
}

/// One event together with the logical instant it was due.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScheduledTick {
    pub event: TickEvent,
    pub at: Timestamp,
}

/// A fixed-period timer on the logical clock.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Cadence {
    event: TickEvent,
    period_ms: u64,
    next_due: Timestamp,
}

impl Cadence {
    /// First firing happens one full period after `start`.
    #[must_use]
    pub fn new(event: TickEvent, period_ms: u64, start: Timestamp) -> Self {
        debug_assert!(period_ms > 0);
        Self {
            event,
            period_ms,
            next_due: start.add_millis(period_ms),
        }
    }

    #[must_use]
    pub fn event(&self) -> TickEvent {
        self.event
    }

    #[must_use]
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    #[must_use]
    pub fn next_due(&self) -> Timestamp {
        self.next_due
    }
}

/// Drives every cadence off one logical clock.
///
/// `advance` never runs anything itself. It returns due ticks in the order
/// they must be applied and the caller applies them one at a time, so no
/// cadence can interleave with another.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    now: Timestamp,
    cadences: Vec<Cadence>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Timestamp::ZERO,
            cadences: Vec::new(),
        }
    }

    /// Adds a cadence that first fires one period from now.
    #[must_use]
    pub fn with_cadence(mut self, event: TickEvent, period_ms: u64) -> Self {
        self.cadences.push(Cadence::new(event, period_ms, self.now));
        self
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.now
    }

    #[must_use]
    pub fn cadences(&self) -> &[Cadence] {
        &self.cadences
    }

    /// Moves the clock forward by `elapsed_ms` and returns every tick that
    /// fell due, sorted by due time and then by event priority.
    ///
    /// A single call covers at most [`MAX_ADVANCE_MS`]; anything beyond that
    /// is dropped rather than replayed.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<ScheduledTick> {
        let target = self.now.add_millis(elapsed_ms.min(MAX_ADVANCE_MS));
        let mut due = Vec::new();

        while let Some(index) = self.next_due_index(target) {
            let cadence = &mut self.cadences[index];
            due.push(ScheduledTick {
                event: cadence.event,
                at: cadence.next_due,
            });
            cadence.next_due = cadence.next_due.add_millis(cadence.period_ms);
        }

        self.now = target;
        due
    }

    fn next_due_index(&self, target: Timestamp) -> Option<usize> {
        self.cadences
            .iter()
            .enumerate()
            .filter(|(_, cadence)| cadence.next_due <= target)
            .min_by_key(|(_, cadence)| (cadence.next_due, cadence.event.priority()))
            .map(|(index, _)| index)
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::clock::Timestamp;
    use crate::config::MAX_ADVANCE_MS;
    use crate::food::FoodKind;

    use super::{ScheduledTick, TickEvent, TickScheduler};

    fn reference_scheduler() -> TickScheduler {
        TickScheduler::new()
            .with_cadence(TickEvent::Move, 200)
            .with_cadence(TickEvent::Spawn(FoodKind::Food), 3_000)
            .with_cadence(TickEvent::Expire, 100)
    }

    fn count(ticks: &[ScheduledTick], event: TickEvent) -> usize {
        ticks.iter().filter(|tick| tick.event == event).count()
    }

    #[test]
    fn cadences_start_one_period_out() {
        let scheduler = reference_scheduler();

        let firsts: Vec<(TickEvent, u64, u64)> = scheduler
            .cadences()
            .iter()
            .map(|cadence| {
                (
                    cadence.event(),
                    cadence.period_ms(),
                    cadence.next_due().as_millis(),
                )
            })
            .collect();

        assert_eq!(
            firsts,
            vec![
                (TickEvent::Move, 200, 200),
                (TickEvent::Spawn(FoodKind::Food), 3_000, 3_000),
                (TickEvent::Expire, 100, 100),
            ]
        );
    }

    #[test]
    fn nothing_fires_before_the_first_period() {
        let mut scheduler = reference_scheduler();

        assert!(scheduler.advance(99).is_empty());
        assert_eq!(scheduler.now(), Timestamp::from_millis(99));
    }

    #[test]
    fn each_cadence_fires_at_its_own_rate() {
        let mut scheduler = reference_scheduler();

        let ticks = scheduler.advance(6_000);

        assert_eq!(count(&ticks, TickEvent::Move), 30);
        assert_eq!(count(&ticks, TickEvent::Expire), 60);
        assert_eq!(count(&ticks, TickEvent::Spawn(FoodKind::Food)), 2);
    }

    #[test]
    fn ticks_are_ordered_by_time_then_priority() {
        let mut scheduler = reference_scheduler();

        let ticks = scheduler.advance(3_000);

        assert!(ticks.windows(2).all(|pair| pair[0].at <= pair[1].at));

        let at_3000: Vec<TickEvent> = ticks
            .iter()
            .filter(|tick| tick.at == Timestamp::from_millis(3_000))
            .map(|tick| tick.event)
            .collect();
        assert_eq!(
            at_3000,
            vec![
                TickEvent::Expire,
                TickEvent::Move,
                TickEvent::Spawn(FoodKind::Food)
            ]
        );
    }

    #[test]
    fn small_increments_add_up() {
        let mut scheduler = reference_scheduler();
        let mut moves = 0;

        for _ in 0..100 {
            moves += count(&scheduler.advance(16), TickEvent::Move);
        }

        // 1600 ms of 16 ms frames.
        assert_eq!(moves, 8);
    }

    #[test]
    fn huge_elapsed_is_capped_to_one_advance_span() {
        let mut scheduler = TickScheduler::new().with_cadence(TickEvent::Move, 200);

        let ticks = scheduler.advance(u64::MAX - 100);

        assert_eq!(scheduler.now(), Timestamp::from_millis(MAX_ADVANCE_MS));
        assert_eq!(ticks.len() as u64, MAX_ADVANCE_MS / 200);
        assert!(ticks.iter().all(|tick| tick.at <= scheduler.now()));
    }

    #[test]
    fn zero_elapsed_fires_nothing() {
        let mut scheduler = reference_scheduler();
        scheduler.advance(200);

        assert!(scheduler.advance(0).is_empty());
    }
}
