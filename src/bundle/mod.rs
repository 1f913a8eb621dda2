//! # Bundle Layout
//!
//! Fixed file layout of the input motion photo folder and the output live photo folder.

mod locator;

pub use locator::{MotionPhotoBundle, OutputBundle};

/// Still image expected inside a motion photo folder
pub const INPUT_IMAGE_NAME: &str = "image.jpg";

/// Video clip expected inside a motion photo folder
pub const INPUT_VIDEO_NAME: &str = "video.mp4";

/// Transcoded still written to the output folder
pub const OUTPUT_IMAGE_NAME: &str = "image.heic";

/// Transcoded video written to the output folder
pub const OUTPUT_VIDEO_NAME: &str = "video.mov";
