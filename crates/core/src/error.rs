use std::fmt;

use thiserror::Error;

use crate::FrameRate;

/// The display field a component error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Hours,
    Minutes,
    Seconds,
    Frames,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Hours => "hours",
            Component::Minutes => "minutes",
            Component::Seconds => "seconds",
            Component::Frames => "frames",
        };
        f.write_str(name)
    }
}

/// Coarse error category, for callers that only need to branch on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidFrameRate,
    InvalidFormat,
    ComponentOutOfRange,
    FrameRateMismatch,
    ArithmeticOverflow,
}

/// Errors produced by frame rate and timecode operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimecodeError {
    #[error("Invalid frame rate {0}: custom rates must be greater than 0 and at most 1000 fps")]
    InvalidFrameRate(f64),

    #[error("Invalid timecode '{0}': expected HH:MM:SS:FF, HH:MM:SS;FF or a frame count")]
    InvalidFormat(String),

    #[error("{component} value {value} is out of range (valid: 0..={max})")]
    ComponentOutOfRange {
        component: Component,
        value: u64,
        max: u64,
    },

    #[error(
        "{minutes:02}:00;{frames:02} is not a drop-frame label: frames 00 and 01 are skipped at the start of minutes not divisible by 10"
    )]
    SkippedDropFrameLabel { minutes: u32, frames: u32 },

    #[error("Frame rate mismatch: {left} vs {right}")]
    FrameRateMismatch { left: FrameRate, right: FrameRate },

    #[error("Frame count arithmetic overflowed")]
    ArithmeticOverflow,
}

impl TimecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TimecodeError::InvalidFrameRate(_) => ErrorKind::InvalidFrameRate,
            TimecodeError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            TimecodeError::ComponentOutOfRange { .. }
            | TimecodeError::SkippedDropFrameLabel { .. } => ErrorKind::ComponentOutOfRange,
            TimecodeError::FrameRateMismatch { .. } => ErrorKind::FrameRateMismatch,
            TimecodeError::ArithmeticOverflow => ErrorKind::ArithmeticOverflow,
        }
    }
}

pub type Result<T> = std::result::Result<T, TimecodeError>;
