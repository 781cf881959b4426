pub mod drop_frame;
mod format;
pub mod frame_rate;
mod parser;
pub mod schema;
pub mod timecode;
