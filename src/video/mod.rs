//! # Video Processing Module
//!
//! Converts the motion photo's MP4 clip into a QuickTime container.

pub mod transcoder;

pub use transcoder::{TranscodedVideo, VideoTranscoder};
