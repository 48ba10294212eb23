use std::path::Path;

use common::OverviewState;

use crate::maps::{self, MapMetadata};
use crate::snapshot::SnapshotBuilder;
use crate::{Decoder, EventIngestor, JsonLinesDecoder, MatchError};

/// Frame and tick rates above this are treated as corrupt.
pub const MAX_RATE: f64 = 1024.0;

/// The header's frame count is only a hint, preallocation stops here.
const MAX_PREALLOCATED_STATES: usize = 1 << 16;

/// Values used in place of what the recording cannot provide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Config {
    pub fallback_frame_rate: Option<f64>,
    pub fallback_tick_rate: Option<f64>,
}

/// A fully parsed recording, ready to be played back.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Match {
    pub map_name: String,
    pub map: MapMetadata,
    pub frame_rate: f64,
    pub frame_rate_rounded: usize,
    pub tick_rate: f64,
    /// Lifetime of a smoke effect in frames.
    pub smoke_effect_lifetime: usize,
    pub half_starts: Vec<usize>,
    pub round_starts: Vec<usize>,
    pub states: Vec<OverviewState>,
}

impl Match {
    /// Memory maps the decoded recording at `path` and parses it.
    pub fn open<P>(path: P, config: &Config) -> Result<Self, MatchError>
    where
        P: AsRef<Path>,
    {
        let file = std::fs::File::open(path.as_ref())?;
        // The mapping is only read while parsing and dropped afterwards
        let mmap = unsafe { memmap2::MmapOptions::new().map(&file)? };

        let decoder = JsonLinesDecoder::new(&mmap)?;
        Self::parse(decoder, config)
    }

    #[tracing::instrument(skip(decoder, config))]
    pub fn parse<D>(mut decoder: D, config: &Config) -> Result<Self, MatchError>
    where
        D: Decoder,
    {
        let header = decoder.header().clone();

        let frame_rate = resolve_rate(
            header.frame_rate,
            config.fallback_frame_rate,
            "framerate",
            MatchError::MissingFrameRate,
        )?;
        let tick_rate = resolve_rate(
            decoder.tick_rate(),
            config.fallback_tick_rate,
            "tickrate",
            MatchError::MissingTickRate,
        )?;

        let map = match MapMetadata::lookup(&header.map_name) {
            Some(m) => m,
            None => {
                tracing::warn!(map = %header.map_name, "Unknown map, coordinates will not be aligned to the radar");
                MapMetadata::UNKNOWN
            }
        };

        tracing::info!(map = %header.map_name, frame_rate, tick_rate, frames = header.playback_frames, "Parsing match");

        let mut ingestor = EventIngestor::new(frame_rate);
        let mut snapshots =
            SnapshotBuilder::with_capacity(header.playback_frames.min(MAX_PREALLOCATED_STATES));

        while let Some(frame) = decoder.next_frame() {
            let frame = match frame {
                Ok(f) => f,
                Err(e) => {
                    tracing::warn!(frame = e.frame, "Skipping frame: {}", e);
                    continue;
                }
            };

            let _frame_guard = tracing::trace_span!("Frame", frame = frame.number).entered();

            for event in frame.events.iter() {
                ingestor.handle(frame.number, frame.time, event);
            }

            snapshots.push(&frame, ingestor.phase(), ingestor.effects());
        }

        tracing::info!(states = snapshots.len(), "Parsed match");

        let smoke_effect_lifetime = ingestor.lifetimes().smoke;
        let (half_starts, round_starts) = ingestor.into_starts();

        Ok(Self {
            map_name: header.map_name,
            map,
            frame_rate,
            frame_rate_rounded: frame_rate.round() as usize,
            tick_rate,
            smoke_effect_lifetime,
            half_starts,
            round_starts,
            states: snapshots.finish(),
        })
    }

    pub fn state(&self, index: usize) -> Option<&OverviewState> {
        self.states.get(index)
    }

    /// Index into [`Match::round_starts`] of the round running at `frame`,
    /// `None` before the first round start.
    pub fn round_at(&self, frame: usize) -> Option<usize> {
        self.round_starts
            .partition_point(|start| *start <= frame)
            .checked_sub(1)
    }

    /// World coordinates to coordinates relative to the radar's top left corner.
    pub fn translate(&self, x: f32, y: f32) -> (f32, f32) {
        maps::translate(&self.map, x, y)
    }

    /// Like [`Match::translate`], additionally scaled to radar pixels.
    pub fn translate_scaled(&self, x: f32, y: f32) -> (f32, f32) {
        maps::translate_scaled(&self.map, x, y)
    }
}

fn valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0 && rate <= MAX_RATE
}

fn resolve_rate(
    reported: f64,
    fallback: Option<f64>,
    name: &'static str,
    missing: MatchError,
) -> Result<f64, MatchError> {
    if valid_rate(reported) {
        return Ok(reported);
    }

    let fallback = fallback.ok_or(missing)?;
    if !valid_rate(fallback) {
        return Err(MatchError::InvalidFallback {
            name,
            value: fallback,
        });
    }

    tracing::info!(reported, fallback, "Using fallback {}", name);
    Ok(fallback)
}
