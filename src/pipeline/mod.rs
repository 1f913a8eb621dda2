//! # Conversion Pipeline
//!
//! Sequences input location, image and video transcoding, and the EXIF copy.

pub mod converter;

pub use converter::{LivePhoto, LivePhotoConverter};
