use common::Phase;

use crate::GameEvent;

/// Follows the round phases announced by game events.
///
/// Warmup is never entered through events, the world state reports it per
/// tick instead (see [`crate::timer::derive`]).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTracker {
    phase: Phase,
    since: time::Duration,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Playback time of the latest transition.
    pub fn since(&self) -> time::Duration {
        self.since
    }

    /// Applies the transition belonging to `event`, if there is one.
    ///
    /// Returns whether the phase was (re-)entered.
    pub fn handle(&mut self, event: &GameEvent, time: time::Duration) -> bool {
        let next = match event {
            GameEvent::RoundStart => Phase::Freezetime,
            GameEvent::FreezetimeEnd => Phase::Regular,
            GameEvent::BombPlanted => Phase::Planted,
            GameEvent::RoundEnd => Phase::Restart,
            GameEvent::HalfEnded => Phase::Halftime,
            _ => return false,
        };

        tracing::trace!(from = ?self.phase, to = ?next, ?time, "Phase transition");

        self.phase = next;
        self.since = time;
        true
    }
}
