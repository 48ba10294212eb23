pub mod equipment;
pub use equipment::{EquipmentClass, EquipmentType};

pub mod overview;
pub use overview::{
    Bomb, GrenadeEffect, GrenadeProjectile, Inferno, Kill, OverviewState, Player, Shot, TeamState,
};

/// A position on the map plane, in world units unless stated otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Team {
    #[default]
    Unassigned,
    Spectators,
    Terrorists,
    CounterTerrorists,
}

impl Team {
    /// Whether players on this team take part in the rounds.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Terrorists | Self::CounterTerrorists)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Phase {
    #[default]
    Warmup,
    Freezetime,
    Regular,
    Planted,
    Restart,
    Halftime,
}

/// The on-screen countdown for a single frame.
///
/// `time_remaining` is negative when the next phase event arrives later than
/// the configured duration suggests.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timer {
    pub time_remaining: time::Duration,
    pub phase: Phase,
}
