//! The fully resolved per-frame state handed to renderers.

use crate::{EquipmentType, Point, Team, Timer};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    pub name: String,
    pub steam_id64: u64,
    pub team: Team,
    pub position: Point,
    pub last_alive_position: Point,
    pub view_direction_x: f32,
    pub flash_duration: f32,
    pub flash_time_remaining: time::Duration,
    /// Held weapons and grenades sorted by type.
    pub inventory: Vec<EquipmentType>,
    pub health: i16,
    pub armor: i16,
    pub money: i16,
    pub kills: i16,
    pub deaths: i16,
    pub assists: i16,
    pub is_alive: bool,
    pub is_defusing: bool,
    pub has_helmet: bool,
    pub has_defuse_kit: bool,
    pub has_bomb: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GrenadeProjectile {
    pub position: Point,
    pub kind: EquipmentType,
}

/// Outline of the currently burning area of a molotov or incendiary.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Inferno {
    pub convex_hull: Vec<Point>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bomb {
    pub position: Point,
    pub is_being_carried: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamState {
    pub clan_name: String,
    pub score: u8,
}

/// Area effect of a detonated flash, HE or smoke grenade.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GrenadeEffect {
    pub position: Point,
    pub grenade_type: EquipmentType,
    /// Frames since the detonation.
    pub lifetime: u32,
}

/// Tracer marker of a fired weapon.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shot {
    pub position: Point,
    pub view_direction_x: f32,
    pub is_awp_shot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Kill {
    pub killer_name: String,
    pub killer_team: Team,
    pub victim_name: String,
    pub victim_team: Team,
    pub weapon: EquipmentType,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverviewState {
    /// Decoder frame this state was built from.
    pub frame: usize,
    pub ingame_tick: i32,
    pub players: Vec<Player>,
    pub grenades: Vec<GrenadeProjectile>,
    pub infernos: Vec<Inferno>,
    pub bomb: Bomb,
    pub team_counter_terrorists: TeamState,
    pub team_terrorists: TeamState,
    pub timer: Timer,
    pub grenade_effects: Vec<GrenadeEffect>,
    pub shots: Vec<Shot>,
    /// The most recent kills, oldest first.
    pub killfeed: Vec<Kill>,
}
