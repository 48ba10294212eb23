//! Frame indexed timeline of short lived visual effects.
//!
//! Every effect is registered once, at the frame of the event that caused it,
//! and is then visible for a fixed number of frames. The index only keeps the
//! frames inside its window: buckets live in a ring indexed by
//! `frame % window`, and a bucket is reclaimed the first time a later frame
//! maps onto the same slot. Registrations therefore have to arrive with
//! non-decreasing origin frames, which is how the decoder delivers events.

use std::collections::VecDeque;
use std::ops::Range;

use common::{EquipmentType, GrenadeEffect, Kill, Point, Shot};

/// Number of kills the feed shows at once.
pub const KILLFEED_CAPACITY: usize = 5;

/// Flash and HE effects last a fixed number of frames, regardless of the frame rate.
pub const FLASH_EFFECT_LIFETIME: usize = 10;
pub const HE_EFFECT_LIFETIME: usize = 10;

const SMOKE_SECONDS: f64 = 18.0;
const KILLFEED_SECONDS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Grenade {
        position: Point,
        grenade_type: EquipmentType,
    },
    Shot(Shot),
    Kill(Kill),
}

/// Effect lifetimes in frames, derived from the playback frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetimes {
    pub flash: usize,
    pub he: usize,
    pub smoke: usize,
    pub shot: usize,
    pub awp_shot: usize,
    pub killfeed: usize,
}

impl Lifetimes {
    pub fn new(frame_rate: f64) -> Self {
        Self {
            flash: FLASH_EFFECT_LIFETIME,
            he: HE_EFFECT_LIFETIME,
            smoke: (SMOKE_SECONDS * frame_rate) as usize,
            shot: shot_lifetime(frame_rate, false),
            awp_shot: shot_lifetime(frame_rate, true),
            killfeed: frame_rate.round() as usize * KILLFEED_SECONDS,
        }
    }

    /// The longest lifetime, which is how many frames an index has to hold.
    pub fn window(&self) -> usize {
        [
            self.flash,
            self.he,
            self.smoke,
            self.shot,
            self.awp_shot,
            self.killfeed,
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
        .max(1)
    }

    pub fn grenade(&self, grenade: EquipmentType) -> usize {
        match grenade {
            EquipmentType::Flash => self.flash,
            EquipmentType::Smoke => self.smoke,
            _ => self.he,
        }
    }
}

/// How many frames a tracer stays visible. AWP tracers linger longer.
pub fn shot_lifetime(frame_rate: f64, is_awp: bool) -> usize {
    let divisor = if is_awp { 8.0 } else { 32.0 };
    (((frame_rate + 1.0) / divisor).round() as usize).max(1)
}

/// The effects visible on a single frame, each kind in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEffects {
    pub grenade_effects: Vec<GrenadeEffect>,
    pub shots: Vec<Shot>,
    pub killfeed: Vec<Kill>,
}

impl FrameEffects {
    pub fn is_empty(&self) -> bool {
        self.grenade_effects.is_empty() && self.shots.is_empty() && self.killfeed.is_empty()
    }
}

#[derive(Debug, Default)]
struct Bucket {
    frame: Option<usize>,
    grenades: Vec<(usize, Point, EquipmentType)>,
    shots: Vec<Shot>,
    kills: VecDeque<Kill>,
}

impl Bucket {
    fn reset(&mut self, frame: usize) {
        self.frame = Some(frame);
        self.grenades.clear();
        self.shots.clear();
        self.kills.clear();
    }
}

#[derive(Debug)]
pub struct EffectLifetimeIndex {
    buckets: Vec<Bucket>,
}

impl EffectLifetimeIndex {
    /// Creates an index able to hold effects living up to `window` frames.
    pub fn with_window(window: usize) -> Self {
        let mut buckets = Vec::new();
        buckets.resize_with(window.max(1), Bucket::default);
        Self { buckets }
    }

    pub fn window(&self) -> usize {
        self.buckets.len()
    }

    /// Makes `effect` visible on the frames `origin..origin + lifetime`.
    ///
    /// Lifetimes longer than the window are cut to the window.
    pub fn register(&mut self, effect: Effect, origin: usize, lifetime: usize) {
        let lifetime = if lifetime > self.window() {
            tracing::warn!(lifetime, window = self.window(), "Effect outlives the index window");
            self.window()
        } else {
            lifetime
        };

        for frame in origin..origin + lifetime {
            let bucket = self.bucket_mut(frame);
            match &effect {
                Effect::Grenade {
                    position,
                    grenade_type,
                } => bucket.grenades.push((origin, *position, *grenade_type)),
                Effect::Shot(shot) => bucket.shots.push(*shot),
                Effect::Kill(kill) => {
                    if bucket.kills.len() >= KILLFEED_CAPACITY {
                        bucket.kills.pop_front();
                    }
                    bucket.kills.push_back(kill.clone());
                }
            }
        }
    }

    /// Removes all grenade effects from the given frames.
    pub fn clear_grenade_effects(&mut self, frames: Range<usize>) {
        for frame in frames {
            let idx = self.slot(frame);
            let bucket = &mut self.buckets[idx];
            if bucket.frame == Some(frame) {
                bucket.grenades.clear();
            }
        }
    }

    pub fn entries_at(&self, frame: usize) -> FrameEffects {
        let bucket = match self.bucket(frame) {
            Some(b) => b,
            None => return FrameEffects::default(),
        };

        FrameEffects {
            grenade_effects: bucket
                .grenades
                .iter()
                .map(|(origin, position, grenade_type)| GrenadeEffect {
                    position: *position,
                    grenade_type: *grenade_type,
                    lifetime: (frame - origin) as u32,
                })
                .collect(),
            shots: bucket.shots.clone(),
            killfeed: bucket.kills.iter().cloned().collect(),
        }
    }

    fn slot(&self, frame: usize) -> usize {
        frame % self.buckets.len()
    }

    fn bucket(&self, frame: usize) -> Option<&Bucket> {
        let bucket = &self.buckets[self.slot(frame)];
        (bucket.frame == Some(frame)).then_some(bucket)
    }

    fn bucket_mut(&mut self, frame: usize) -> &mut Bucket {
        let idx = self.slot(frame);
        let bucket = &mut self.buckets[idx];
        if bucket.frame != Some(frame) {
            bucket.reset(frame);
        }
        bucket
    }
}
