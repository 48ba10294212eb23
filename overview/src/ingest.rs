//! Routes decoded game events to the phase tracker and the effect index.

use common::{EquipmentClass, EquipmentType, Kill, Shot, Team};

use crate::decoder::{Combatant, Detonation, Shooter};
use crate::effects::{Effect, EffectLifetimeIndex, Lifetimes};
use crate::{GameEvent, PhaseTracker};

/// Name shown in the kill feed when nobody (or the map) is responsible.
pub const WORLD: &str = "World";

#[derive(Debug)]
pub struct EventIngestor {
    phase: PhaseTracker,
    effects: EffectLifetimeIndex,
    lifetimes: Lifetimes,
    half_starts: Vec<usize>,
    round_starts: Vec<usize>,
}

impl EventIngestor {
    pub fn new(frame_rate: f64) -> Self {
        let lifetimes = Lifetimes::new(frame_rate);

        Self {
            phase: PhaseTracker::new(),
            effects: EffectLifetimeIndex::with_window(lifetimes.window()),
            lifetimes,
            half_starts: Vec::new(),
            round_starts: Vec::new(),
        }
    }

    pub fn phase(&self) -> &PhaseTracker {
        &self.phase
    }

    pub fn effects(&self) -> &EffectLifetimeIndex {
        &self.effects
    }

    pub fn lifetimes(&self) -> &Lifetimes {
        &self.lifetimes
    }

    /// Consumes the ingestor, returning the half and round start frames.
    pub fn into_starts(self) -> (Vec<usize>, Vec<usize>) {
        (self.half_starts, self.round_starts)
    }

    /// Applies a single event that fired at `frame`, playback time `time`.
    pub fn handle(&mut self, frame: usize, time: time::Duration, event: &GameEvent) {
        tracing::trace!(frame, event = event.name(), "Handling event");

        match event {
            GameEvent::MatchStart | GameEvent::HalfEnded | GameEvent::WinPanelMatch => {
                self.half_starts.push(frame);
            }
            GameEvent::RoundStart => {
                self.round_starts.push(frame);
                // Smokes of the previous round disappear with the new one
                self.effects
                    .clear_grenade_effects(frame + 1..frame + self.lifetimes.smoke);
            }
            GameEvent::FreezetimeEnd | GameEvent::BombPlanted | GameEvent::RoundEnd => {}
            GameEvent::WeaponFire { shooter, weapon } => {
                self.weapon_fire(frame, shooter.as_ref(), *weapon);
            }
            GameEvent::FlashExplode(detonation) => {
                self.detonation(frame, detonation, self.lifetimes.flash);
            }
            GameEvent::HeExplode(detonation) => {
                self.detonation(frame, detonation, self.lifetimes.he);
            }
            GameEvent::SmokeStart(detonation) => {
                self.detonation(frame, detonation, self.lifetimes.smoke);
            }
            GameEvent::Kill {
                killer,
                victim,
                weapon,
            } => {
                self.kill(frame, killer.as_ref(), victim.as_ref(), *weapon);
            }
        };

        self.phase.handle(event, time);
    }

    fn weapon_fire(&mut self, frame: usize, shooter: Option<&Shooter>, weapon: EquipmentType) {
        let shooter = match shooter {
            Some(s) => s,
            None => return,
        };

        if matches!(
            weapon.class(),
            EquipmentClass::Equipment | EquipmentClass::Grenade | EquipmentClass::Unknown
        ) {
            return;
        }

        let is_awp_shot = weapon == EquipmentType::Awp;
        let lifetime = if is_awp_shot {
            self.lifetimes.awp_shot
        } else {
            self.lifetimes.shot
        };

        let shot = Shot {
            position: shooter.position.to_point(),
            view_direction_x: shooter.view_direction_x,
            is_awp_shot,
        };
        self.effects.register(Effect::Shot(shot), frame, lifetime);
    }

    fn detonation(&mut self, frame: usize, detonation: &Detonation, lifetime: usize) {
        let effect = Effect::Grenade {
            position: detonation.position.to_point(),
            grenade_type: detonation.grenade,
        };
        self.effects.register(effect, frame, lifetime);
    }

    fn kill(
        &mut self,
        frame: usize,
        killer: Option<&Combatant>,
        victim: Option<&Combatant>,
        weapon: EquipmentType,
    ) {
        let (killer_name, killer_team) = identity(killer);
        let (victim_name, victim_team) = identity(victim);

        let kill = Kill {
            killer_name,
            killer_team,
            victim_name,
            victim_team,
            weapon,
        };
        self.effects
            .register(Effect::Kill(kill), frame, self.lifetimes.killfeed);
    }
}

fn identity(combatant: Option<&Combatant>) -> (String, Team) {
    match combatant {
        Some(c) => (c.name.clone(), c.team),
        None => (WORLD.to_owned(), Team::Unassigned),
    }
}
