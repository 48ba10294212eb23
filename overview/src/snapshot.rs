//! Assembles the per-frame [`OverviewState`]s.

use common::{
    Bomb, EquipmentType, GrenadeProjectile, Inferno, OverviewState, Player, TeamState,
};

use crate::decoder::{BombState, Frame, InfernoState, Participant, TeamInfo};
use crate::effects::EffectLifetimeIndex;
use crate::timer::{self, PhaseDurations};
use crate::PhaseTracker;

/// Collects one state per decoded frame, in decoding order.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    states: Vec<OverviewState>,
}

impl SnapshotBuilder {
    pub fn with_capacity(frames: usize) -> Self {
        Self {
            states: Vec::with_capacity(frames),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Builds the state of `frame` and appends it.
    pub fn push(&mut self, frame: &Frame, phase: &PhaseTracker, effects: &EffectLifetimeIndex) {
        let state = build(frame, phase, effects);
        self.states.push(state);
    }

    pub fn finish(self) -> Vec<OverviewState> {
        self.states
    }
}

pub fn build(frame: &Frame, phase: &PhaseTracker, effects: &EffectLifetimeIndex) -> OverviewState {
    let world = &frame.state;

    let durations = PhaseDurations::from_convars(&world.convars);
    let timer = timer::derive(
        phase.phase(),
        phase.since(),
        frame.time,
        &durations,
        world.is_warmup,
    );

    let frame_effects = effects.entries_at(frame.number);

    OverviewState {
        frame: frame.number,
        ingame_tick: world.ingame_tick,
        players: world
            .participants
            .iter()
            .filter(|p| p.team.is_playing())
            .map(player)
            .collect(),
        grenades: world
            .grenades
            .iter()
            .map(|g| GrenadeProjectile {
                position: g.position.to_point(),
                kind: g.kind,
            })
            .collect(),
        infernos: world.infernos.iter().map(inferno).collect(),
        bomb: bomb(&world.bomb),
        team_counter_terrorists: team(&world.counter_terrorists),
        team_terrorists: team(&world.terrorists),
        timer,
        grenade_effects: frame_effects.grenade_effects,
        shots: frame_effects.shots,
        killfeed: frame_effects.killfeed,
    }
}

pub fn player(participant: &Participant) -> Player {
    let mut has_bomb = false;
    let mut inventory = Vec::with_capacity(participant.weapons.len());
    for weapon in participant.weapons.iter() {
        if weapon.kind == EquipmentType::Bomb {
            has_bomb = true;
        }

        if weapon.kind.is_weapon_or_grenade() {
            // A second flash sits in the reserve ammo
            if weapon.kind == EquipmentType::Flash && weapon.ammo_reserve > 0 {
                inventory.push(weapon.kind);
            }
            inventory.push(weapon.kind);
        }
    }
    inventory.sort();

    Player {
        name: participant.name.clone(),
        steam_id64: participant.steam_id64,
        team: participant.team,
        position: participant.position.to_point(),
        last_alive_position: participant.last_alive_position.to_point(),
        view_direction_x: participant.view_direction_x,
        flash_duration: participant.flash_duration,
        flash_time_remaining: time::Duration::checked_seconds_f32(
            participant.flash_time_remaining,
        )
        .unwrap_or(time::Duration::ZERO),
        inventory,
        health: saturate(participant.health),
        armor: saturate(participant.armor),
        money: saturate(participant.money),
        kills: saturate(participant.kills),
        deaths: saturate(participant.deaths),
        assists: saturate(participant.assists),
        is_alive: participant.is_alive,
        is_defusing: participant.is_defusing,
        has_helmet: participant.has_helmet,
        has_defuse_kit: participant.has_defuse_kit,
        has_bomb,
    }
}

fn inferno(inferno: &InfernoState) -> Inferno {
    let burning = inferno
        .fires
        .iter()
        .filter(|f| f.is_burning)
        .map(|f| f.position.to_point())
        .collect();

    Inferno {
        convex_hull: crate::hull::convex_hull(burning),
    }
}

fn bomb(bomb: &BombState) -> Bomb {
    Bomb {
        position: bomb.position.to_point(),
        is_being_carried: bomb.carrier.is_some(),
    }
}

fn team(team: &TeamInfo) -> TeamState {
    TeamState {
        clan_name: team.clan_name.clone(),
        score: team.score.clamp(0, u8::MAX as i32) as u8,
    }
}

fn saturate(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}
