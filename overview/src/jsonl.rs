//! Decoded recordings stored as newline delimited JSON.
//!
//! The first record is the header, every following line is either a decoded
//! frame or the decoder's report of a frame it failed on:
//!
//! ```text
//! {"header": {"map_name": "de_nuke", "frame_rate": 64.0, "playback_frames": 2, "tick_rate": 64.0}}
//! {"frame": {"number": 0, "time_ms": 0, "events": [{"type": "RoundStart"}], "state": {...}}}
//! {"error": {"number": 1, "reason": "entity table overflow"}}
//! ```
//!
//! Convars are only written when they change, a frame exposes all values seen
//! so far.

use std::collections::HashMap;
use std::sync::Arc;

use crate::decoder::{Decoder, DemoHeader, Frame, GameEvent, TickError, WorldState};
use crate::MatchError;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum Record {
    Header(HeaderRecord),
    Frame(FrameRecord),
    Error(ErrorRecord),
}

#[derive(Debug, serde::Deserialize)]
struct HeaderRecord {
    map_name: String,
    #[serde(default)]
    frame_rate: f64,
    #[serde(default)]
    playback_frames: usize,
    #[serde(default)]
    tick_rate: f64,
}

#[derive(Debug, serde::Deserialize)]
struct FrameRecord {
    number: usize,
    time_ms: i64,
    #[serde(default)]
    events: Vec<GameEvent>,
    #[serde(default)]
    state: WorldState,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorRecord {
    number: usize,
    reason: String,
}

pub struct JsonLinesDecoder<'b> {
    header: DemoHeader,
    tick_rate: f64,
    rest: &'b [u8],
    last_frame: Option<usize>,
    convars: Arc<HashMap<String, String>>,
}

impl<'b> JsonLinesDecoder<'b> {
    pub fn new(data: &'b [u8]) -> Result<Self, MatchError> {
        let mut rest = data;
        let line = next_line(&mut rest).ok_or_else(|| MatchError::Header {
            reason: "recording is empty".to_owned(),
        })?;

        let header = match serde_json::from_slice::<Record>(line) {
            Ok(Record::Header(h)) => h,
            Ok(_) => {
                return Err(MatchError::Header {
                    reason: "first record is not a header".to_owned(),
                })
            }
            Err(e) => {
                return Err(MatchError::Header {
                    reason: e.to_string(),
                })
            }
        };

        tracing::debug!(?header, "Read header");

        Ok(Self {
            header: DemoHeader {
                map_name: header.map_name,
                frame_rate: header.frame_rate,
                playback_frames: header.playback_frames,
            },
            tick_rate: header.tick_rate,
            rest,
            last_frame: None,
            convars: Arc::default(),
        })
    }

    fn next_number(&self) -> usize {
        self.last_frame.map(|n| n + 1).unwrap_or(0)
    }
}

impl<'b> Decoder for JsonLinesDecoder<'b> {
    fn header(&self) -> &DemoHeader {
        &self.header
    }

    fn tick_rate(&self) -> f64 {
        self.tick_rate
    }

    fn next_frame(&mut self) -> Option<Result<Frame, TickError>> {
        let line = next_line(&mut self.rest)?;

        let record = match serde_json::from_slice::<Record>(line) {
            Ok(r) => r,
            Err(e) => {
                let frame = self.next_number();
                self.last_frame = Some(frame);
                return Some(Err(TickError {
                    frame,
                    reason: e.to_string(),
                }));
            }
        };

        let result = match record {
            Record::Frame(FrameRecord {
                number,
                time_ms,
                events,
                mut state,
            }) => {
                self.last_frame = Some(number);

                if !state.convars.is_empty() {
                    let changed = Arc::try_unwrap(std::mem::take(&mut state.convars))
                        .unwrap_or_else(|shared| (*shared).clone());
                    Arc::make_mut(&mut self.convars).extend(changed);
                }
                state.convars = Arc::clone(&self.convars);

                Ok(Frame {
                    number,
                    time: time::Duration::milliseconds(time_ms),
                    events,
                    state,
                })
            }
            Record::Error(ErrorRecord { number, reason }) => {
                self.last_frame = Some(number);
                Err(TickError {
                    frame: number,
                    reason,
                })
            }
            Record::Header(_) => {
                let frame = self.next_number();
                self.last_frame = Some(frame);
                Err(TickError {
                    frame,
                    reason: "unexpected header record".to_owned(),
                })
            }
        };

        Some(result)
    }
}

/// Splits off the next non-blank line.
fn next_line<'b>(rest: &mut &'b [u8]) -> Option<&'b [u8]> {
    while !rest.is_empty() {
        let data: &'b [u8] = *rest;
        let (line, remaining) = match data.iter().position(|b| *b == b'\n') {
            Some(idx) => (&data[..idx], &data[idx + 1..]),
            None => (data, &data[data.len()..]),
        };
        *rest = remaining;

        if !line.iter().all(u8::is_ascii_whitespace) {
            return Some(line);
        }
    }

    None
}
