use std::path::{Path, PathBuf};

use tracing::debug;

use super::{INPUT_IMAGE_NAME, INPUT_VIDEO_NAME, OUTPUT_IMAGE_NAME, OUTPUT_VIDEO_NAME};
use crate::error::{ConverterError, Result};

/// A motion photo folder whose still and video are known to exist
#[derive(Debug, Clone)]
pub struct MotionPhotoBundle {
    pub folder: PathBuf,
    pub image: PathBuf,
    pub video: PathBuf,
}

impl MotionPhotoBundle {
    /// Resolve the fixed input names inside `folder`.
    ///
    /// Fails with `MissingInput` naming the first absent file. The folder itself
    /// is not checked; a missing folder surfaces as a missing image.
    pub fn locate<P: AsRef<Path>>(folder: P) -> Result<Self> {
        let folder = folder.as_ref();
        let image = folder.join(INPUT_IMAGE_NAME);
        let video = folder.join(INPUT_VIDEO_NAME);

        for path in [&image, &video] {
            if !path.exists() {
                return Err(ConverterError::missing_input(path));
            }
        }

        debug!("Located motion photo: {:?} + {:?}", image, video);

        Ok(Self {
            folder: folder.to_path_buf(),
            image,
            video,
        })
    }
}

/// The live photo output folder and its fixed file paths
#[derive(Debug, Clone)]
pub struct OutputBundle {
    pub folder: PathBuf,
    pub image: PathBuf,
    pub video: PathBuf,
}

impl OutputBundle {
    /// Compute output paths without touching the filesystem
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        let folder = folder.as_ref();
        Self {
            folder: folder.to_path_buf(),
            image: folder.join(OUTPUT_IMAGE_NAME),
            video: folder.join(OUTPUT_VIDEO_NAME),
        }
    }

    /// Create the output folder if needed. Existing folders are left as they are.
    pub async fn prepare<P: AsRef<Path>>(folder: P) -> Result<Self> {
        let bundle = Self::new(folder);
        tokio::fs::create_dir_all(&bundle.folder).await?;
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_locate_complete_bundle() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("image.jpg"));
        touch(&dir.path().join("video.mp4"));

        let bundle = MotionPhotoBundle::locate(dir.path()).unwrap();
        assert_eq!(bundle.image, dir.path().join("image.jpg"));
        assert_eq!(bundle.video, dir.path().join("video.mp4"));
    }

    #[test]
    fn test_missing_video() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("image.jpg"));

        let err = MotionPhotoBundle::locate(dir.path()).unwrap_err();
        assert_eq!(err.kind(), "missing-input");
        assert!(err.to_string().contains("video.mp4"));
    }

    #[test]
    fn test_missing_image() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("video.mp4"));

        let err = MotionPhotoBundle::locate(dir.path()).unwrap_err();
        assert!(err.to_string().contains("image.jpg"));
    }

    #[test]
    fn test_other_names_are_rejected() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("IMG_1234.jpg"));
        touch(&dir.path().join("VID_1234.mp4"));

        assert!(MotionPhotoBundle::locate(dir.path()).is_err());
    }

    #[tokio::test]
    async fn test_prepare_is_idempotent() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("live").join("nested");

        let first = OutputBundle::prepare(&out).await.unwrap();
        let second = OutputBundle::prepare(&out).await.unwrap();

        assert!(out.is_dir());
        assert_eq!(first.image, out.join("image.heic"));
        assert_eq!(second.video, out.join("video.mov"));
    }
}
