use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::schema::FrameRateRepr;
use crate::error::{Result, TimecodeError};

/// Upper bound accepted for custom frame rates.
pub const MAX_CUSTOM_FPS: f64 = 1000.0;

/// Tolerance used when matching a measured rate onto a named rate.
const FPS_MATCH_TOLERANCE: f64 = 0.01;

/// A custom frame rate that has passed validation (finite, 0 < fps <= 1000).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomRate(f64);

impl CustomRate {
    pub fn new(fps: f64) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 || fps > MAX_CUSTOM_FPS {
            return Err(TimecodeError::InvalidFrameRate(fps));
        }
        Ok(Self(fps))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

// NaN and signed zero are rejected at construction, so float equality is total here.
impl Eq for CustomRate {}

impl Hash for CustomRate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Constant frame rates supported for timecode display and arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FrameRateRepr", into = "FrameRateRepr")]
pub enum FrameRate {
    /// 23.976 fps (24000/1001), film transferred to NTSC
    Fps23_976,
    Fps24,
    /// PAL
    Fps25,
    /// 29.97 fps drop-frame, the only rate that skips frame labels
    Fps29_97Df,
    /// 29.97 fps non-drop-frame
    Fps29_97Ndf,
    Fps30,
    Fps50,
    /// 59.94 fps (60000/1001), counted non-drop
    Fps59_94,
    Fps60,
    Custom(CustomRate),
}

impl FrameRate {
    /// Every named rate, in ascending order. Useful for rate pickers.
    pub const STANDARD: [FrameRate; 9] = [
        FrameRate::Fps23_976,
        FrameRate::Fps24,
        FrameRate::Fps25,
        FrameRate::Fps29_97Df,
        FrameRate::Fps29_97Ndf,
        FrameRate::Fps30,
        FrameRate::Fps50,
        FrameRate::Fps59_94,
        FrameRate::Fps60,
    ];

    /// Build a custom rate, failing with `InvalidFrameRate` outside (0, 1000].
    pub fn custom(fps: f64) -> Result<Self> {
        CustomRate::new(fps).map(FrameRate::Custom)
    }

    /// Map a measured media rate (e.g. from container metadata) onto the closest named
    /// rate. 29.97 resolves to non-drop; anything unrecognised becomes `Custom`.
    pub fn from_fps(fps: f64) -> Result<Self> {
        let matched = [
            FrameRate::Fps23_976,
            FrameRate::Fps24,
            FrameRate::Fps25,
            FrameRate::Fps29_97Ndf,
            FrameRate::Fps30,
            FrameRate::Fps50,
            FrameRate::Fps59_94,
            FrameRate::Fps60,
        ]
        .into_iter()
        .find(|rate| (rate.frames_per_second() - fps).abs() < FPS_MATCH_TOLERANCE);

        match matched {
            Some(rate) => Ok(rate),
            None => FrameRate::custom(fps),
        }
    }

    /// Rounded frames per second, used for component math and validation.
    pub fn nominal_frame_rate(&self) -> u32 {
        match self {
            FrameRate::Fps23_976 | FrameRate::Fps24 => 24,
            FrameRate::Fps25 => 25,
            FrameRate::Fps29_97Df | FrameRate::Fps29_97Ndf | FrameRate::Fps30 => 30,
            FrameRate::Fps50 => 50,
            FrameRate::Fps59_94 | FrameRate::Fps60 => 60,
            FrameRate::Custom(rate) => (rate.get().round() as u32).max(1),
        }
    }

    /// True frames per second, used for wall-clock duration conversions.
    pub fn frames_per_second(&self) -> f64 {
        match self {
            FrameRate::Fps23_976 => 24000.0 / 1001.0,
            FrameRate::Fps24 => 24.0,
            FrameRate::Fps25 => 25.0,
            FrameRate::Fps29_97Df | FrameRate::Fps29_97Ndf => 30000.0 / 1001.0,
            FrameRate::Fps30 => 30.0,
            FrameRate::Fps50 => 50.0,
            FrameRate::Fps59_94 => 60000.0 / 1001.0,
            FrameRate::Fps60 => 60.0,
            FrameRate::Custom(rate) => rate.get(),
        }
    }

    pub fn is_drop_frame(&self) -> bool {
        matches!(self, FrameRate::Fps29_97Df)
    }

    pub fn display_name(&self) -> String {
        match self {
            FrameRate::Fps23_976 => "23.976".to_string(),
            FrameRate::Fps24 => "24".to_string(),
            FrameRate::Fps25 => "25".to_string(),
            FrameRate::Fps29_97Df => "29.97 DF".to_string(),
            FrameRate::Fps29_97Ndf => "29.97 NDF".to_string(),
            FrameRate::Fps30 => "30".to_string(),
            FrameRate::Fps50 => "50".to_string(),
            FrameRate::Fps59_94 => "59.94".to_string(),
            FrameRate::Fps60 => "60".to_string(),
            FrameRate::Custom(rate) => format!("{} (custom)", rate.get()),
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for FrameRate {
    type Err = TimecodeError;

    /// Accepts display names and the usual shorthands: "23.976", "23.98", "24",
    /// "29.97df", "29.97 NDF", "59.94", "48fps". Unknown numbers become `Custom`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .trim_end_matches("fps")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let rate = match normalized.as_str() {
            "23.976" | "23.98" => FrameRate::Fps23_976,
            "24" => FrameRate::Fps24,
            "25" => FrameRate::Fps25,
            "29.97df" | "29.97d" | "df" => FrameRate::Fps29_97Df,
            "29.97" | "29.97ndf" | "ndf" => FrameRate::Fps29_97Ndf,
            "30" => FrameRate::Fps30,
            "50" => FrameRate::Fps50,
            "59.94" => FrameRate::Fps59_94,
            "60" => FrameRate::Fps60,
            other => {
                let fps: f64 = other
                    .trim_end_matches("(custom)")
                    .parse()
                    .map_err(|_| TimecodeError::InvalidFormat(s.to_string()))?;
                FrameRate::custom(fps)?
            }
        };
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_nominal_rates() {
        assert_eq!(FrameRate::Fps23_976.nominal_frame_rate(), 24);
        assert_eq!(FrameRate::Fps29_97Df.nominal_frame_rate(), 30);
        assert_eq!(FrameRate::Fps29_97Ndf.nominal_frame_rate(), 30);
        assert_eq!(FrameRate::Fps59_94.nominal_frame_rate(), 60);
        assert_eq!(FrameRate::custom(47.952).unwrap().nominal_frame_rate(), 48);
        assert_eq!(FrameRate::custom(0.25).unwrap().nominal_frame_rate(), 1);
    }

    #[test]
    fn test_true_rates() {
        assert_eq!(FrameRate::Fps23_976.frames_per_second(), 24000.0 / 1001.0);
        assert_eq!(FrameRate::Fps29_97Df.frames_per_second(), 30000.0 / 1001.0);
        assert_eq!(FrameRate::Fps60.frames_per_second(), 60.0);
    }

    #[test]
    fn test_only_29_97_df_drops() {
        let dropping: Vec<_> = FrameRate::STANDARD
            .iter()
            .filter(|rate| rate.is_drop_frame())
            .collect();
        assert_eq!(dropping, vec![&FrameRate::Fps29_97Df]);
    }

    #[test]
    fn test_custom_validation() {
        assert!(FrameRate::custom(1000.0).is_ok());
        assert!(FrameRate::custom(0.001).is_ok());
        for bad in [0.0, -24.0, 1000.5, f64::NAN, f64::INFINITY] {
            let err = FrameRate::custom(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFrameRate);
        }
    }

    #[test]
    fn test_equality() {
        assert_eq!(FrameRate::custom(48.0).unwrap(), FrameRate::custom(48.0).unwrap());
        assert_ne!(FrameRate::custom(48.0).unwrap(), FrameRate::custom(47.0).unwrap());
        assert_ne!(FrameRate::custom(24.0).unwrap(), FrameRate::Fps24);
        assert_ne!(FrameRate::Fps29_97Df, FrameRate::Fps29_97Ndf);
    }

    #[test]
    fn test_from_fps() {
        assert_eq!(FrameRate::from_fps(23.976).unwrap(), FrameRate::Fps23_976);
        assert_eq!(FrameRate::from_fps(29.97).unwrap(), FrameRate::Fps29_97Ndf);
        assert_eq!(FrameRate::from_fps(59.94).unwrap(), FrameRate::Fps59_94);
        assert_eq!(FrameRate::from_fps(25.0).unwrap(), FrameRate::Fps25);
        assert_eq!(
            FrameRate::from_fps(48.0).unwrap(),
            FrameRate::custom(48.0).unwrap()
        );
        assert!(FrameRate::from_fps(-1.0).is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("29.97df".parse::<FrameRate>().unwrap(), FrameRate::Fps29_97Df);
        assert_eq!("29.97 DF".parse::<FrameRate>().unwrap(), FrameRate::Fps29_97Df);
        assert_eq!("29.97".parse::<FrameRate>().unwrap(), FrameRate::Fps29_97Ndf);
        assert_eq!("24fps".parse::<FrameRate>().unwrap(), FrameRate::Fps24);
        assert_eq!("23.98".parse::<FrameRate>().unwrap(), FrameRate::Fps23_976);
        assert_eq!(
            "12.5".parse::<FrameRate>().unwrap(),
            FrameRate::custom(12.5).unwrap()
        );
        assert_eq!(
            "fast".parse::<FrameRate>().unwrap_err().kind(),
            ErrorKind::InvalidFormat
        );
        assert_eq!(
            "2000".parse::<FrameRate>().unwrap_err().kind(),
            ErrorKind::InvalidFrameRate
        );
    }

    #[test]
    fn test_display_names_parse_back() {
        for rate in FrameRate::STANDARD {
            assert_eq!(rate.display_name().parse::<FrameRate>().unwrap(), rate);
        }
        let custom = FrameRate::custom(48.0).unwrap();
        assert_eq!(custom.to_string(), "48 (custom)");
        assert_eq!(custom.to_string().parse::<FrameRate>().unwrap(), custom);
    }
}
