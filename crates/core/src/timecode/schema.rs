//! Versioned on-disk representation of frame rates and timecodes.
//!
//! The public types serialise through these shapes so that stored markers keep
//! decoding even if the in-memory layout changes.

use serde::{Deserialize, Serialize};

use super::frame_rate::FrameRate;
use super::timecode::Timecode;
use crate::error::TimecodeError;

/// Current `Timecode` schema version.
pub const TIMECODE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum FrameRateRepr {
    Ntsc23_976,
    Film24,
    Pal25,
    Ntsc29_97Df,
    Ntsc29_97Ndf,
    Fps30,
    Pal50,
    Ntsc59_94,
    Fps60,
    Custom { fps: f64 },
}

impl From<FrameRate> for FrameRateRepr {
    fn from(rate: FrameRate) -> Self {
        match rate {
            FrameRate::Fps23_976 => FrameRateRepr::Ntsc23_976,
            FrameRate::Fps24 => FrameRateRepr::Film24,
            FrameRate::Fps25 => FrameRateRepr::Pal25,
            FrameRate::Fps29_97Df => FrameRateRepr::Ntsc29_97Df,
            FrameRate::Fps29_97Ndf => FrameRateRepr::Ntsc29_97Ndf,
            FrameRate::Fps30 => FrameRateRepr::Fps30,
            FrameRate::Fps50 => FrameRateRepr::Pal50,
            FrameRate::Fps59_94 => FrameRateRepr::Ntsc59_94,
            FrameRate::Fps60 => FrameRateRepr::Fps60,
            FrameRate::Custom(rate) => FrameRateRepr::Custom { fps: rate.get() },
        }
    }
}

impl TryFrom<FrameRateRepr> for FrameRate {
    type Error = TimecodeError;

    fn try_from(repr: FrameRateRepr) -> Result<Self, Self::Error> {
        let rate = match repr {
            FrameRateRepr::Ntsc23_976 => FrameRate::Fps23_976,
            FrameRateRepr::Film24 => FrameRate::Fps24,
            FrameRateRepr::Pal25 => FrameRate::Fps25,
            FrameRateRepr::Ntsc29_97Df => FrameRate::Fps29_97Df,
            FrameRateRepr::Ntsc29_97Ndf => FrameRate::Fps29_97Ndf,
            FrameRateRepr::Fps30 => FrameRate::Fps30,
            FrameRateRepr::Pal50 => FrameRate::Fps50,
            FrameRateRepr::Ntsc59_94 => FrameRate::Fps59_94,
            FrameRateRepr::Fps60 => FrameRate::Fps60,
            FrameRateRepr::Custom { fps } => FrameRate::custom(fps)?,
        };
        Ok(rate)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct TimecodeRepr {
    version: u32,
    frames: i64,
    rate: FrameRate,
}

impl From<Timecode> for TimecodeRepr {
    fn from(timecode: Timecode) -> Self {
        TimecodeRepr {
            version: TIMECODE_SCHEMA_VERSION,
            frames: timecode.frames(),
            rate: timecode.frame_rate(),
        }
    }
}

impl TryFrom<TimecodeRepr> for Timecode {
    type Error = String;

    fn try_from(repr: TimecodeRepr) -> Result<Self, Self::Error> {
        if repr.version != TIMECODE_SCHEMA_VERSION {
            return Err(format!(
                "unsupported timecode schema version {} (expected {})",
                repr.version, TIMECODE_SCHEMA_VERSION
            ));
        }
        Ok(Timecode::from_frames(repr.frames, repr.rate))
    }
}
