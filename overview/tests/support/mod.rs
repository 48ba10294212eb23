#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use overview::decoder::{Frame, TickError, WorldState};
use overview::{Decoder, DemoHeader, GameEvent};

/// Replays a fixed list of frames.
pub struct ScriptedDecoder {
    header: DemoHeader,
    tick_rate: f64,
    frames: VecDeque<Result<Frame, TickError>>,
}

impl ScriptedDecoder {
    pub fn new(map_name: &str, frame_rate: f64, tick_rate: f64) -> Self {
        Self {
            header: DemoHeader {
                map_name: map_name.to_owned(),
                frame_rate,
                playback_frames: 0,
            },
            tick_rate,
            frames: VecDeque::new(),
        }
    }

    /// Adds frames `0..count`, frame `n` playing at `n * frame_ms` with the
    /// given events.
    pub fn frames(
        mut self,
        count: usize,
        frame_ms: i64,
        state: &WorldState,
        mut events: HashMap<usize, Vec<GameEvent>>,
    ) -> Self {
        for number in 0..count {
            self.frames.push_back(Ok(Frame {
                number,
                time: time::Duration::milliseconds(number as i64 * frame_ms),
                events: events.remove(&number).unwrap_or_default(),
                state: state.clone(),
            }));
        }
        self.header.playback_frames += count;
        self
    }

    pub fn frame(mut self, number: usize, events: Vec<GameEvent>, state: WorldState) -> Self {
        self.frames.push_back(Ok(Frame {
            number,
            time: time::Duration::milliseconds(number as i64 * 100),
            events,
            state,
        }));
        self.header.playback_frames += 1;
        self
    }

    pub fn error(mut self, number: usize, reason: &str) -> Self {
        self.frames.push_back(Err(TickError {
            frame: number,
            reason: reason.to_owned(),
        }));
        self.header.playback_frames += 1;
        self
    }
}

impl Decoder for ScriptedDecoder {
    fn header(&self) -> &DemoHeader {
        &self.header
    }

    fn tick_rate(&self) -> f64 {
        self.tick_rate
    }

    fn next_frame(&mut self) -> Option<Result<Frame, TickError>> {
        self.frames.pop_front()
    }
}

pub fn convars(values: &[(&str, &str)]) -> Arc<HashMap<String, String>> {
    Arc::new(
        values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}
