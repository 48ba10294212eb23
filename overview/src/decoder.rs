//! The interface to the replay decoder.
//!
//! Decoding the recording itself happens elsewhere, this module only describes
//! what the timeline needs from it: a header, the tick rate and an ordered
//! sequence of frames.

use std::collections::HashMap;
use std::sync::Arc;

use common::{EquipmentType, Point, Team};

pub trait Decoder {
    fn header(&self) -> &DemoHeader;

    fn tick_rate(&self) -> f64;

    /// Advances to the next frame.
    ///
    /// Returns `None` once the recording is exhausted. An `Err` only concerns
    /// the returned frame, decoding continues with the next call.
    fn next_frame(&mut self) -> Option<Result<Frame, TickError>>;
}

#[derive(Debug, thiserror::Error)]
#[error("could not decode frame {frame}: {reason}")]
pub struct TickError {
    pub frame: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoHeader {
    pub map_name: String,
    /// Playback frames per second, zero or NaN if the recording does not say.
    pub frame_rate: f64,
    pub playback_frames: usize,
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub number: usize,
    /// Playback time of this frame.
    pub time: time::Duration,
    /// Events fired while decoding this frame, in order.
    pub events: Vec<GameEvent>,
    pub state: WorldState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Vector {
    /// Projection onto the map plane.
    pub fn to_point(&self) -> Point {
        Point::new(self.x as f32, self.y as f32)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    MatchStart,
    RoundStart,
    FreezetimeEnd,
    BombPlanted,
    RoundEnd,
    HalfEnded,
    WinPanelMatch,
    WeaponFire {
        shooter: Option<Shooter>,
        weapon: EquipmentType,
    },
    FlashExplode(Detonation),
    HeExplode(Detonation),
    SmokeStart(Detonation),
    Kill {
        killer: Option<Combatant>,
        victim: Option<Combatant>,
        weapon: EquipmentType,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MatchStart => "MatchStart",
            Self::RoundStart => "RoundStart",
            Self::FreezetimeEnd => "FreezetimeEnd",
            Self::BombPlanted => "BombPlanted",
            Self::RoundEnd => "RoundEnd",
            Self::HalfEnded => "HalfEnded",
            Self::WinPanelMatch => "WinPanelMatch",
            Self::WeaponFire { .. } => "WeaponFire",
            Self::FlashExplode(_) => "FlashExplode",
            Self::HeExplode(_) => "HeExplode",
            Self::SmokeStart(_) => "SmokeStart",
            Self::Kill { .. } => "Kill",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Shooter {
    pub position: Vector,
    pub view_direction_x: f32,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Combatant {
    pub name: String,
    pub team: Team,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Detonation {
    pub position: Vector,
    pub grenade: EquipmentType,
}

/// Everything the decoder knows about the world at a single tick.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct WorldState {
    pub ingame_tick: i32,
    pub is_warmup: bool,
    pub participants: Vec<Participant>,
    pub grenades: Vec<Projectile>,
    pub infernos: Vec<InfernoState>,
    pub bomb: BombState,
    pub counter_terrorists: TeamInfo,
    pub terrorists: TeamInfo,
    /// Shared between frames until a value changes.
    pub convars: Arc<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Participant {
    pub name: String,
    pub steam_id64: u64,
    pub team: Team,
    pub position: Vector,
    pub last_alive_position: Vector,
    pub view_direction_x: f32,
    pub flash_duration: f32,
    /// Seconds.
    pub flash_time_remaining: f32,
    pub health: i32,
    pub armor: i32,
    pub money: i32,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub is_alive: bool,
    pub is_defusing: bool,
    pub has_helmet: bool,
    pub has_defuse_kit: bool,
    pub weapons: Vec<HeldWeapon>,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct HeldWeapon {
    pub kind: EquipmentType,
    #[serde(default)]
    pub ammo_reserve: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Projectile {
    pub position: Vector,
    pub kind: EquipmentType,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct InfernoState {
    pub fires: Vec<Fire>,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Fire {
    pub position: Vector,
    #[serde(default = "burning")]
    pub is_burning: bool,
}

fn burning() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct BombState {
    pub position: Vector,
    /// Steam id of the carrying player.
    pub carrier: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct TeamInfo {
    pub clan_name: String,
    pub score: i32,
}
