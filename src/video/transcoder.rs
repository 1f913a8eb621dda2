use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{VideoConfig, VideoMode};
use crate::error::{Result, VideoError};
use crate::tools::{self, FFMPEG};

/// Represents a transcoded video output
#[derive(Debug, Clone)]
pub struct TranscodedVideo {
    pub path: PathBuf,
    pub file_size: u64,
}

/// MP4 to MOV transcoder backed by the `ffmpeg` executable
pub struct VideoTranscoder {
    config: VideoConfig,
}

impl VideoTranscoder {
    pub fn new(config: VideoConfig) -> Self {
        Self { config }
    }

    pub fn check_ffmpeg_available(&self) -> bool {
        tools::resolve_tool(FFMPEG, self.config.ffmpeg_path.as_deref()).is_some()
    }

    /// Convert `src` into a QuickTime file at `dst`, overwriting it.
    ///
    /// Blocks the pipeline until ffmpeg exits. Every ffmpeg failure is reported
    /// as `VideoError::TranscodeFailed`.
    pub async fn transcode<P: AsRef<Path>>(&self, src: P, dst: P) -> Result<TranscodedVideo> {
        let src = src.as_ref();
        let dst = dst.as_ref();

        let ffmpeg = tools::resolve_tool(FFMPEG, self.config.ffmpeg_path.as_deref())
            .ok_or_else(|| VideoError::ToolUnavailable { tool: FFMPEG.to_string() })?;

        debug!("Transcoding {:?} -> {:?} ({:?})", src, dst, self.config.mode);

        let run = tools::run_tool(&ffmpeg, self.build_args(src, dst))
            .await
            .map_err(|reason| VideoError::TranscodeFailed { reason })?;

        if !run.success {
            return Err(VideoError::TranscodeFailed {
                reason: format!("FFmpeg failed: {}", run.failure_reason()),
            }.into());
        }

        let file_size = std::fs::metadata(dst)
            .map_err(|e| VideoError::TranscodeFailed {
                reason: format!("FFmpeg produced no output at {}: {}", dst.display(), e),
            })?
            .len();

        info!("Converted {} to {}", src.display(), dst.display());

        Ok(TranscodedVideo {
            path: dst.to_path_buf(),
            file_size,
        })
    }

    fn build_args(&self, src: &Path, dst: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(src.into());

        match self.config.mode {
            VideoMode::Remux => {
                args.extend(["-c", "copy"].iter().map(OsString::from));
            }
            VideoMode::Reencode => {
                args.push("-c:v".into());
                args.push(self.config.video_codec.as_str().into());
                args.push("-c:a".into());
                args.push(self.config.audio_codec.as_str().into());
            }
        }

        args.extend(self.config.extra_args.iter().map(OsString::from));
        args.push("-f".into());
        args.push("mov".into());
        args.push(dst.into());
        args
    }
}
