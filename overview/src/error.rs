/// Failures that stop a [`crate::Match`] from being constructed at all.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("could not read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse header: {reason}")]
    Header { reason: String },

    #[error("could not parse framerate from demo, please provide a fallback value (command-line option --framerate)")]
    MissingFrameRate,

    #[error("could not parse tickrate from demo, please provide a fallback value (command-line option --tickrate)")]
    MissingTickRate,

    #[error("invalid fallback {name}: {value}")]
    InvalidFallback { name: &'static str, value: f64 },
}
