//! # Still Image Processing
//!
//! Decodes the motion photo's JPEG still and re-encodes it as HEIC.

pub mod transcoder;

pub use transcoder::{ImageTranscoder, TranscodedImage};
