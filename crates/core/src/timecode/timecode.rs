use std::cmp::Ordering;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::drop_frame::{self, Components};
use super::frame_rate::FrameRate;
use super::schema::TimecodeRepr;
use crate::error::{Result, TimecodeError};

/// A position or duration expressed as an elapsed frame count at a constant rate.
///
/// The frame count is the source of truth; hours/minutes/seconds/frames are only
/// ever derived from it for display. Counts may be negative, e.g. the result of
/// subtracting a later timecode from an earlier one.
///
/// Timecodes at different rates are never equal. There is no `PartialOrd`: ordering
/// goes through [`Timecode::try_cmp`] or [`sort_within_rate`], which report
/// `FrameRateMismatch` across rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimecodeRepr", into = "TimecodeRepr")]
pub struct Timecode {
    frames: i64,
    frame_rate: FrameRate,
}

impl Timecode {
    pub fn from_frames(frames: i64, frame_rate: FrameRate) -> Self {
        Self { frames, frame_rate }
    }

    pub fn zero(frame_rate: FrameRate) -> Self {
        Self::from_frames(0, frame_rate)
    }

    /// Build a timecode from display components.
    ///
    /// Fails with `ComponentOutOfRange` when minutes or seconds are 60 or more, when
    /// frames reach the nominal rate, or when the label is skipped by drop-frame
    /// counting. Hours are unbounded; a count that does not fit in 64 bits fails with
    /// `ArithmeticOverflow`.
    pub fn from_components(
        hours: u64,
        minutes: u32,
        seconds: u32,
        frames: u32,
        frame_rate: FrameRate,
    ) -> Result<Self> {
        let count = drop_frame::components_to_frames(hours, minutes, seconds, frames, frame_rate)?;
        Ok(Self::from_frames(count, frame_rate))
    }

    /// Quantise a wall-clock duration to the nearest frame.
    pub fn from_seconds(seconds: f64, frame_rate: FrameRate) -> Result<Self> {
        let exact = seconds * frame_rate.frames_per_second();
        if !exact.is_finite() {
            return Err(TimecodeError::ArithmeticOverflow);
        }
        // 2^63 is exactly representable, i64::MAX is not.
        let rounded = exact.round();
        if rounded < i64::MIN as f64 || rounded >= -(i64::MIN as f64) {
            return Err(TimecodeError::ArithmeticOverflow);
        }
        Ok(Self::from_frames(rounded as i64, frame_rate))
    }

    pub fn from_duration(duration: Duration, frame_rate: FrameRate) -> Result<Self> {
        Self::from_seconds(duration.as_secs_f64(), frame_rate)
    }

    pub fn frames(&self) -> i64 {
        self.frames
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    pub fn is_negative(&self) -> bool {
        self.frames < 0
    }

    /// Display components of the frame count, computed from its magnitude.
    pub fn components(&self) -> Components {
        drop_frame::frames_to_components(self.frames, self.frame_rate)
    }

    pub fn duration_in_seconds(&self) -> f64 {
        self.frames as f64 / self.frame_rate.frames_per_second()
    }

    /// Magnitude of this timecode as a `Duration`.
    pub fn to_duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.duration_in_seconds().abs())
            .map_err(|_| TimecodeError::ArithmeticOverflow)
    }

    /// Same frames, different rate: the same footage shown at another nominal rate.
    pub fn converting_rate(&self, frame_rate: FrameRate) -> Self {
        Self::from_frames(self.frames, frame_rate)
    }

    /// Same real-world duration, re-quantised to the new rate.
    pub fn converting_duration(&self, frame_rate: FrameRate) -> Result<Self> {
        Self::from_seconds(self.duration_in_seconds(), frame_rate)
    }

    pub fn checked_add(&self, other: &Timecode) -> Result<Self> {
        self.ensure_same_rate(other)?;
        self.frames
            .checked_add(other.frames)
            .map(|frames| Self::from_frames(frames, self.frame_rate))
            .ok_or(TimecodeError::ArithmeticOverflow)
    }

    pub fn checked_sub(&self, other: &Timecode) -> Result<Self> {
        self.ensure_same_rate(other)?;
        self.frames
            .checked_sub(other.frames)
            .map(|frames| Self::from_frames(frames, self.frame_rate))
            .ok_or(TimecodeError::ArithmeticOverflow)
    }

    pub fn checked_mul(&self, scalar: i64) -> Result<Self> {
        self.frames
            .checked_mul(scalar)
            .map(|frames| Self::from_frames(frames, self.frame_rate))
            .ok_or(TimecodeError::ArithmeticOverflow)
    }

    /// Fails only for `i64::MIN`, whose negation does not fit.
    pub fn checked_neg(&self) -> Result<Self> {
        self.frames
            .checked_neg()
            .map(|frames| Self::from_frames(frames, self.frame_rate))
            .ok_or(TimecodeError::ArithmeticOverflow)
    }

    pub fn checked_abs(&self) -> Result<Self> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(*self)
        }
    }

    /// Order two timecodes, failing if they are at different rates.
    pub fn try_cmp(&self, other: &Timecode) -> Result<Ordering> {
        self.ensure_same_rate(other)?;
        Ok(self.frames.cmp(&other.frames))
    }

    fn ensure_same_rate(&self, other: &Timecode) -> Result<()> {
        if self.frame_rate != other.frame_rate {
            return Err(TimecodeError::FrameRateMismatch {
                left: self.frame_rate,
                right: other.frame_rate,
            });
        }
        Ok(())
    }
}

/// Sort timecodes in place by frame count.
///
/// Every entry must share one rate; otherwise the slice is left untouched and the
/// first mismatching pair is reported.
pub fn sort_within_rate(timecodes: &mut [Timecode]) -> Result<()> {
    if let Some(first) = timecodes.first().copied() {
        for timecode in timecodes.iter() {
            first.ensure_same_rate(timecode)?;
        }
    }
    timecodes.sort_by_key(|timecode| timecode.frames);
    Ok(())
}
