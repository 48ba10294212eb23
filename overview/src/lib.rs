//! Builds a navigable per-frame timeline of a recorded match.
//!
//! A [`Decoder`] delivers frames in order, each carrying the game events that
//! fired while decoding it and the world state of that tick. [`Match::parse`]
//! runs them through a single ingestion pass and keeps one [`OverviewState`]
//! per successfully decoded frame.

pub mod decoder;
pub use decoder::{Decoder, DemoHeader, Frame, GameEvent, TickError, WorldState};

pub mod jsonl;
pub use jsonl::JsonLinesDecoder;

pub mod maps;
pub use maps::MapMetadata;

pub mod phase;
pub use phase::PhaseTracker;

pub mod timer;
pub use timer::PhaseDurations;

pub mod effects;
pub use effects::{Effect, EffectLifetimeIndex, Lifetimes};

mod hull;

pub mod snapshot;

pub mod ingest;
pub use ingest::EventIngestor;

mod error;
pub use error::MatchError;

mod game;
pub use game::{Config, Match, MAX_RATE};

pub use common::OverviewState;
