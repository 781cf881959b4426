//! Conversion between elapsed frame counts and display components.
//!
//! Drop-frame (29.97 DF) is purely a labelling convention over a continuous frame
//! count: at the start of every minute not divisible by ten, the labels `;00` and `;01`
//! are skipped. No frames are ever discarded. Converting a count to components means
//! re-inserting the skipped labels so the numbering becomes linear again, then doing
//! ordinary positional division.
//!
//! Components are always derived from the magnitude of the count; the sign is carried
//! alongside and only applied when formatting.

use super::frame_rate::FrameRate;
use crate::error::{Component, Result, TimecodeError};

/// Labels skipped at each non-exempt minute boundary.
const DROP_FRAMES_PER_MINUTE: u64 = 2;

/// The `HH:MM:SS:FF` decomposition of a frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Components {
    pub negative: bool,
    pub hours: u64,
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

/// Split a frame count into display components for the given rate.
pub fn frames_to_components(frames: i64, rate: FrameRate) -> Components {
    let nominal = u64::from(rate.nominal_frame_rate());
    let frames_per_minute = nominal * 60;
    let frames_per_hour = frames_per_minute * 60;

    let magnitude = frames.unsigned_abs();
    let display = if rate.is_drop_frame() {
        magnitude + skipped_labels(magnitude, frames_per_minute)
    } else {
        magnitude
    };

    Components {
        negative: frames < 0,
        hours: display / frames_per_hour,
        minutes: ((display % frames_per_hour) / frames_per_minute) as u32,
        seconds: ((display % frames_per_minute) / nominal) as u32,
        frames: (display % nominal) as u32,
    }
}

/// Number of drop-frame labels skipped before `magnitude` elapsed frames.
fn skipped_labels(magnitude: u64, frames_per_minute: u64) -> u64 {
    let frames_per_ten_minutes = frames_per_minute * 10 - DROP_FRAMES_PER_MINUTE * 9;

    let blocks = magnitude / frames_per_ten_minutes;
    let remainder = magnitude % frames_per_ten_minutes;

    let mut skipped = blocks * DROP_FRAMES_PER_MINUTE * 9;
    // Minute zero of each block keeps all its labels; every later minute is
    // two frames short.
    if remainder >= frames_per_minute {
        let later_minutes = 1 + (remainder - frames_per_minute)
            / (frames_per_minute - DROP_FRAMES_PER_MINUTE);
        skipped += DROP_FRAMES_PER_MINUTE * later_minutes;
    }
    skipped
}

/// Convert unsigned display components to a frame count, validating each field.
///
/// Minutes and seconds must be below 60 and frames below the nominal rate. At
/// drop-frame rates the skipped labels (`;00`/`;01` at the top of a non-tenth minute)
/// are rejected as well, since no frame carries them.
pub fn components_to_frames(
    hours: u64,
    minutes: u32,
    seconds: u32,
    frames: u32,
    rate: FrameRate,
) -> Result<i64> {
    let nominal = rate.nominal_frame_rate();

    check_range(Component::Minutes, minutes, 60)?;
    check_range(Component::Seconds, seconds, 60)?;
    check_range(Component::Frames, frames, nominal)?;

    let drop_frame = rate.is_drop_frame();
    if drop_frame
        && minutes % 10 != 0
        && seconds == 0
        && u64::from(frames) < DROP_FRAMES_PER_MINUTE
    {
        log::trace!(
            "rejecting skipped drop-frame label {:02}:{:02};{:02}",
            minutes,
            seconds,
            frames
        );
        return Err(TimecodeError::SkippedDropFrameLabel { minutes, frames });
    }

    let nominal = i128::from(nominal);
    let frames_per_minute = nominal * 60;
    let frames_per_hour = frames_per_minute * 60;

    let mut total = i128::from(hours) * frames_per_hour
        + i128::from(minutes) * frames_per_minute
        + i128::from(seconds) * nominal
        + i128::from(frames);

    if drop_frame {
        let total_minutes = i128::from(hours) * 60 + i128::from(minutes);
        total -= i128::from(DROP_FRAMES_PER_MINUTE) * (total_minutes - total_minutes / 10);
    }

    i64::try_from(total).map_err(|_| TimecodeError::ArithmeticOverflow)
}

fn check_range(component: Component, value: u32, limit: u32) -> Result<()> {
    if value >= limit {
        return Err(TimecodeError::ComponentOutOfRange {
            component,
            value: u64::from(value),
            max: u64::from(limit) - 1,
        });
    }
    Ok(())
}
