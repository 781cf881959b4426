use super::frame_rate::FrameRate;
use super::timecode::Timecode;
use crate::error::{Result, TimecodeError};

impl Timecode {
    /// Parse `HH:MM:SS:FF`, `HH:MM:SS;FF` or a bare frame count.
    ///
    /// Surrounding whitespace and a leading `-` are accepted. The `;` separator is
    /// only a display hint; `frame_rate` alone decides how components are counted.
    pub fn parse(input: &str, frame_rate: FrameRate) -> Result<Self> {
        let trimmed = input.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
            return parse_frame_count(body, negative, frame_rate);
        }

        let Some([hours, minutes, seconds, frames]) = split_fields(body) else {
            log::trace!("rejecting timecode input {:?}", input);
            return Err(TimecodeError::InvalidFormat(input.to_string()));
        };

        let magnitude =
            Timecode::from_components(hours.into(), minutes, seconds, frames, frame_rate)?;
        if negative {
            magnitude.checked_neg()
        } else {
            Ok(magnitude)
        }
    }
}

fn parse_frame_count(digits: &str, negative: bool, frame_rate: FrameRate) -> Result<Timecode> {
    let magnitude: i128 = digits
        .parse()
        .map_err(|_| TimecodeError::ArithmeticOverflow)?;
    let signed = if negative { -magnitude } else { magnitude };
    let frames = i64::try_from(signed).map_err(|_| TimecodeError::ArithmeticOverflow)?;
    Ok(Timecode::from_frames(frames, frame_rate))
}

/// Split `HH:MM:SS[:;]FF` into its four numeric fields (1-2 digits each).
fn split_fields(body: &str) -> Option<[u32; 4]> {
    let (head, frames) = body.rsplit_once(|c| c == ':' || c == ';')?;

    let mut fields = head.split(':');
    let hours = parse_field(fields.next()?)?;
    let minutes = parse_field(fields.next()?)?;
    let seconds = parse_field(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }

    Some([hours, minutes, seconds, parse_field(frames)?])
}

fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
