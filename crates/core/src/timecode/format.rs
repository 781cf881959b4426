use std::fmt;

use super::timecode::Timecode;

impl Timecode {
    /// Render as `HH:MM:SS:FF`, or `HH:MM:SS;FF` at drop-frame rates.
    ///
    /// Negative counts get a leading `-`; with `always_show_sign` non-negative counts
    /// get a leading `+`. Hours are padded to two digits but never truncated. EDL, Avid
    /// and CSV exports embed this string as-is, so its shape must stay fixed.
    pub fn formatted(&self, always_show_sign: bool) -> String {
        let components = self.components();
        let sign = if components.negative {
            "-"
        } else if always_show_sign {
            "+"
        } else {
            ""
        };
        let separator = if self.frame_rate().is_drop_frame() {
            ';'
        } else {
            ':'
        };

        format!(
            "{}{:02}:{:02}:{:02}{}{:02}",
            sign,
            components.hours,
            components.minutes,
            components.seconds,
            separator,
            components.frames
        )
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted(false))
    }
}

#[cfg(test)]
mod tests {
    use crate::FrameRate;

    use super::*;

    #[test]
    fn test_drop_frame_boundaries() {
        let rate = FrameRate::Fps29_97Df;
        assert_eq!(Timecode::from_frames(1799, rate).to_string(), "00:00:59;29");
        assert_eq!(Timecode::from_frames(1800, rate).to_string(), "00:01:00;02");
        assert_eq!(Timecode::from_frames(17982, rate).to_string(), "00:10:00;00");
        assert_eq!(Timecode::from_frames(107892, rate).to_string(), "01:00:00;00");
    }

    #[test]
    fn test_non_drop_uses_colon() {
        let tc = Timecode::from_frames(1800, FrameRate::Fps29_97Ndf);
        assert_eq!(tc.to_string(), "00:01:00:00");
        let tc = Timecode::from_frames(86400, FrameRate::Fps24);
        assert_eq!(tc.to_string(), "01:00:00:00");
    }

    #[test]
    fn test_signs() {
        let rate = FrameRate::Fps24;
        assert_eq!(Timecode::from_frames(-86400, rate).to_string(), "-01:00:00:00");
        assert_eq!(Timecode::from_frames(-86400, rate).formatted(true), "-01:00:00:00");
        assert_eq!(Timecode::from_frames(0, rate).formatted(true), "+00:00:00:00");
        assert_eq!(Timecode::from_frames(1, rate).formatted(false), "00:00:00:01");
    }

    #[test]
    fn test_hours_are_not_capped() {
        let tc = Timecode::from_frames(100 * 86400 + 23, FrameRate::Fps24);
        assert_eq!(tc.to_string(), "100:00:00:23");
    }

    #[test]
    fn test_extremes_format_without_panicking() {
        let tc = Timecode::from_frames(i64::MIN, FrameRate::Fps29_97Df);
        assert!(tc.to_string().starts_with('-'));
        let tc = Timecode::from_frames(i64::MAX, FrameRate::Fps60);
        assert!(tc.to_string().ends_with(":07"));
    }
}
