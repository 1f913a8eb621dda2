use std::ffi::OsString;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use tracing::{debug, info};

use crate::config::ImageConfig;
use crate::error::{ImageError, Result};
use crate::tools::{self, HEIF_ENC};

/// Information about a written HEIC file
#[derive(Debug, Clone)]
pub struct TranscodedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
}

/// JPEG to HEIC transcoder.
///
/// Pixels are decoded in-process with the `image` crate and handed to
/// `heif-enc` through a lossless PNG in a scratch directory. EXIF is not
/// carried over here; see [`crate::metadata::MetadataCopier`].
pub struct ImageTranscoder {
    config: ImageConfig,
}

impl ImageTranscoder {
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    /// Decode `src` into a pixel buffer, sniffing the format from content
    pub fn decode<P: AsRef<Path>>(&self, src: P) -> Result<DynamicImage> {
        let src = src.as_ref();
        let decode_failed = |reason: String| ImageError::DecodeFailed {
            path: src.display().to_string(),
            reason,
        };

        let image = image::io::Reader::open(src)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_failed(e.to_string()))?
            .decode()
            .map_err(|e| decode_failed(e.to_string()))?;

        debug!("Decoded {:?}: {}x{} {:?}", src, image.width(), image.height(), image.color());
        Ok(image)
    }

    /// Encode `image` as HEIC at `dst`, replacing any existing file
    pub async fn encode<P: AsRef<Path>>(&self, image: &DynamicImage, dst: P) -> Result<()> {
        let dst = dst.as_ref();
        let write_failed = |reason: String| ImageError::WriteFailed {
            path: dst.display().to_string(),
            reason,
        };

        let encoder = tools::resolve_tool(HEIF_ENC, self.config.heif_enc_path.as_deref())
            .ok_or_else(|| ImageError::EncoderUnavailable { tool: HEIF_ENC.to_string() })?;

        // Dropped (and removed) on every return path below
        let scratch = tempfile::Builder::new()
            .prefix("motion-to-live-")
            .tempdir()
            .map_err(|e| write_failed(format!("Failed to create scratch directory: {}", e)))?;
        let intermediate = scratch.path().join("still.png");

        image
            .save_with_format(&intermediate, ImageFormat::Png)
            .map_err(|e| write_failed(format!("Failed to write intermediate PNG: {}", e)))?;

        let run = tools::run_tool(&encoder, encoder_args(&self.config, &intermediate, dst))
            .await
            .map_err(write_failed)?;

        if !run.success {
            return Err(write_failed(format!("heif-enc failed: {}", run.failure_reason())).into());
        }

        if !dst.exists() {
            return Err(write_failed("heif-enc reported success but wrote no file".to_string()).into());
        }

        Ok(())
    }

    /// Decode `src` and write it as HEIC at `dst`
    pub async fn transcode<P: AsRef<Path>>(&self, src: P, dst: P) -> Result<TranscodedImage> {
        let src = src.as_ref();
        let dst = dst.as_ref();

        let image = self.decode(src)?;
        self.encode(&image, dst).await?;

        let file_size = std::fs::metadata(dst)?.len();
        info!("Converted {} to {}", src.display(), dst.display());

        Ok(TranscodedImage {
            path: dst.to_path_buf(),
            width: image.width(),
            height: image.height(),
            file_size,
        })
    }
}

fn encoder_args(config: &ImageConfig, input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();

    if config.lossless {
        args.push("--lossless".into());
    } else {
        args.push("--quality".into());
        args.push(config.quality.to_string().into());
    }

    args.push("--output".into());
    args.push(output.into());
    args.push(input.into());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn write_test_jpeg(path: &Path) {
        let img = RgbImage::from_fn(16, 8, |x, y| Rgb([(x * 16) as u8, (y * 32) as u8, 128]));
        img.save_with_format(path, ImageFormat::Jpeg).unwrap();
    }

    #[test]
    fn test_decode_valid_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.jpg");
        write_test_jpeg(&path);

        let transcoder = ImageTranscoder::new(ImageConfig::default());
        let image = transcoder.decode(&path).unwrap();
        assert_eq!((image.width(), image.height()), (16, 8));
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.jpg");
        write_test_jpeg(&path);

        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 4]).unwrap();

        let transcoder = ImageTranscoder::new(ImageConfig::default());
        let err = transcoder.decode(&path).unwrap_err();
        assert_eq!(err.kind(), "decode-error");
    }

    #[test]
    fn test_decode_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let transcoder = ImageTranscoder::new(ImageConfig::default());
        assert_eq!(transcoder.decode(&path).unwrap_err().kind(), "decode-error");
    }

    #[test]
    fn test_encoder_args_quality() {
        let args = encoder_args(&ImageConfig::default(), Path::new("in.png"), Path::new("out.heic"));
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["--quality", "90", "--output", "out.heic", "in.png"]);
    }

    #[test]
    fn test_encoder_args_lossless() {
        let config = ImageConfig {
            lossless: true,
            ..ImageConfig::default()
        };
        let args = encoder_args(&config, Path::new("in.png"), Path::new("out.heic"));
        assert_eq!(args[0], OsString::from("--lossless"));
        assert!(!args.contains(&OsString::from("--quality")));
    }

    #[tokio::test]
    async fn test_transcode_to_heic() {
        if !tools::check_tool_with_arg(HEIF_ENC, "--version").available {
            eprintln!("heif-enc not installed, skipping");
            return;
        }

        let dir = tempdir().unwrap();
        let src = dir.path().join("image.jpg");
        let dst = dir.path().join("image.heic");
        write_test_jpeg(&src);

        let transcoder = ImageTranscoder::new(ImageConfig::default());
        let result = transcoder.transcode(&src, &dst).await.unwrap();

        assert!(dst.exists());
        assert!(result.file_size > 0);
        assert_eq!((result.width, result.height), (16, 8));
    }
}
