//! # motion-to-live
//!
//! Convert Android motion photos into live photo bundles.
//!
//! A motion photo folder holds `image.jpg` and `video.mp4`. The converter writes
//! `image.heic` and `video.mov` into an output folder and copies the JPEG's EXIF
//! fields onto the HEIC.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use motion_to_live::{Config, LivePhotoConverter};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let converter = LivePhotoConverter::new(Config::default());
//! let live = converter.convert("motion_photo/", "live_photo/").await?;
//! println!("{} EXIF tags copied", live.metadata.merge.copied());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`bundle`] - Fixed input/output folder layout
//! - [`photo`] - JPEG decoding and HEIC encoding (`heif-enc`)
//! - [`video`] - MP4 to MOV transcoding (`ffmpeg`)
//! - [`metadata`] - Overwrite-only EXIF copy (`little_exif`)
//! - [`pipeline`] - The sequential conversion
//! - [`config`] - Configuration management
//! - [`tools`] - External tool lookup and invocation

pub mod bundle;
pub mod config;
pub mod error;
pub mod metadata;
pub mod photo;
pub mod pipeline;
pub mod tools;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{ConverterError, Result},
    pipeline::{LivePhoto, LivePhotoConverter},
};
