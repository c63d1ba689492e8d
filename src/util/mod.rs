pub mod log;
pub mod misc;
