//! Countdown derivation for the round phases.

use std::collections::HashMap;

use common::{Phase, Timer};
use time::Duration;

/// Bomb timer used when the recording does not carry `mp_c4timer`.
pub const C4_TIMER: Duration = Duration::seconds(40);

/// Configured length of every phase with a countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseDurations {
    pub freezetime: Duration,
    pub round: Duration,
    pub bomb: Duration,
    pub restart_delay: Duration,
    pub halftime: Duration,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            freezetime: Duration::ZERO,
            round: Duration::ZERO,
            bomb: C4_TIMER,
            restart_delay: Duration::ZERO,
            halftime: Duration::ZERO,
        }
    }
}

impl PhaseDurations {
    /// Reads the durations from the server's convars.
    ///
    /// Missing or unparseable values count as zero, apart from the bomb timer
    /// which falls back to [`C4_TIMER`].
    pub fn from_convars(convars: &HashMap<String, String>) -> Self {
        let seconds = |name: &str| convar(convars, name).and_then(Duration::checked_seconds_f64);

        Self {
            freezetime: seconds("mp_freezetime").unwrap_or(Duration::ZERO),
            round: convar(convars, "mp_roundtime_defuse")
                // The game counts down whole seconds
                .and_then(|minutes| Duration::checked_seconds_f64((minutes * 60.0).trunc()))
                .unwrap_or(Duration::ZERO),
            bomb: seconds("mp_c4timer").unwrap_or(C4_TIMER),
            restart_delay: seconds("mp_round_restart_delay").unwrap_or(Duration::ZERO),
            halftime: seconds("mp_halftime_duration").unwrap_or(Duration::ZERO),
        }
    }
}

fn convar(convars: &HashMap<String, String>, name: &str) -> Option<f64> {
    let raw = convars.get(name)?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::debug!(name, raw = %raw, "Unparseable convar");
            None
        }
    }
}

/// Computes the countdown shown for a frame.
///
/// `since` is the playback time of the latest phase transition and `now` the
/// playback time of the frame. Warmup reported by the world state wins over
/// whatever phase the events left behind.
pub fn derive(
    phase: Phase,
    since: Duration,
    now: Duration,
    durations: &PhaseDurations,
    is_warmup: bool,
) -> Timer {
    if is_warmup {
        return Timer {
            time_remaining: Duration::ZERO,
            phase: Phase::Warmup,
        };
    }

    let (duration, shown) = match phase {
        // No transition happened yet.
        Phase::Warmup => return Timer::default(),
        Phase::Freezetime => (durations.freezetime, Phase::Freezetime),
        Phase::Regular => (durations.round, Phase::Regular),
        Phase::Planted => (durations.bomb, Phase::Planted),
        Phase::Restart => (durations.restart_delay, Phase::Restart),
        // The halftime countdown is displayed like the restart delay.
        Phase::Halftime => (durations.halftime, Phase::Restart),
    };

    Timer {
        time_remaining: duration.saturating_sub(now.saturating_sub(since)),
        phase: shown,
    }
}
