use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    bundle::{MotionPhotoBundle, OutputBundle},
    config::Config,
    error::Result,
    metadata::{CopyReport, MetadataCopier},
    photo::{ImageTranscoder, TranscodedImage},
    video::{TranscodedVideo, VideoTranscoder},
};

/// A finished live photo bundle
#[derive(Debug, Clone)]
pub struct LivePhoto {
    pub folder: PathBuf,
    pub image: TranscodedImage,
    pub video: TranscodedVideo,
    pub metadata: CopyReport,
}

/// Orchestrates the motion photo to live photo conversion
///
/// The converter runs four steps in order:
/// 1. Input location - find `image.jpg` and `video.mp4`, fail fast if absent
/// 2. Image transcoding - JPEG to HEIC
/// 3. Video transcoding - MP4 to MOV
/// 4. Metadata copy - EXIF from the JPEG onto the HEIC
///
/// Nothing is rolled back: files written before a failing step stay on disk.
pub struct LivePhotoConverter {
    images: ImageTranscoder,
    videos: VideoTranscoder,
    metadata: MetadataCopier,
}

impl LivePhotoConverter {
    pub fn new(config: Config) -> Self {
        Self {
            images: ImageTranscoder::new(config.image),
            videos: VideoTranscoder::new(config.video),
            metadata: MetadataCopier::new(config.metadata),
        }
    }

    /// Convert the motion photo in `input` into a live photo in `output`.
    ///
    /// `output` is created if needed; existing `image.heic` / `video.mov`
    /// files in it are overwritten.
    pub async fn convert<P: AsRef<Path>>(&self, input: P, output: P) -> Result<LivePhoto> {
        let input = input.as_ref();
        let output = output.as_ref();

        info!("📷 Converting motion photo {:?} -> {:?}", input, output);

        // Step 1: nothing is written until both inputs are known to exist
        let source = MotionPhotoBundle::locate(input)?;
        let target = OutputBundle::prepare(output).await?;
        debug!("Output bundle ready at {:?}", target.folder);

        // Step 2
        let image = self.images.transcode(&source.image, &target.image).await?;

        // Step 3
        let video = self.videos.transcode(&source.video, &target.video).await?;

        // Step 4: needs the HEIC from step 2 on disk
        let metadata = self.metadata.copy(&source.image, &target.image)?;

        info!("✅ Live Photo created in {}:", target.folder.display());
        info!("   - {}", image.path.display());
        info!("   - {}", video.path.display());

        Ok(LivePhoto {
            folder: target.folder,
            image,
            video,
            metadata,
        })
    }
}
