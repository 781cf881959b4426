//! Frame-accurate timecode for video post-production.
//!
//! A [`Timecode`] is an elapsed frame count at a constant [`FrameRate`]. Everything else,
//! including the `HH:MM:SS:FF` display and NTSC drop-frame labelling, is derived from that
//! count with exact integer arithmetic.

pub use config::{
    ConfigError, ConfigFile, ConfigManager, ConfigOption, ConfigSchema, DisplayConfigSchema, Settings,
};
pub use error::{Component, ErrorKind, Result, TimecodeError};
pub use timecode::drop_frame::Components;
pub use timecode::frame_rate::{CustomRate, FrameRate, MAX_CUSTOM_FPS};
pub use timecode::schema::TIMECODE_SCHEMA_VERSION;
pub use timecode::timecode::{sort_within_rate, Timecode};

mod config;
mod error;
mod timecode;
