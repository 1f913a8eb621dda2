use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for the converter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Still image (HEIC) encoding settings
    pub image: ImageConfig,

    /// Video (MOV) transcoding settings
    pub video: VideoConfig,

    /// Metadata copy settings
    pub metadata: MetadataConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.image.validate()?;
        self.video.validate()?;
        Ok(())
    }
}

/// HEIC encoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Explicit path to `heif-enc`; looked up on PATH when unset
    pub heif_enc_path: Option<PathBuf>,

    /// Encoder quality (0-100)
    pub quality: u8,

    /// Encode losslessly (ignores quality)
    pub lossless: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            heif_enc_path: None,
            quality: 90,
            lossless: false,
        }
    }
}

impl ImageConfig {
    fn validate(&self) -> Result<()> {
        if self.quality > 100 {
            return Err(ConfigError::InvalidValue {
                key: "image.quality".to_string(),
                value: self.quality.to_string()
            }.into());
        }

        Ok(())
    }
}

/// How ffmpeg should treat the input streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoMode {
    /// Copy streams into the MOV container untouched
    Remux,
    /// Re-encode with the configured codecs
    Reencode,
}

/// MOV transcoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Explicit path to `ffmpeg`; looked up on PATH when unset
    pub ffmpeg_path: Option<PathBuf>,

    pub mode: VideoMode,

    /// Video codec used in `reencode` mode
    pub video_codec: String,

    /// Audio codec used in `reencode` mode
    pub audio_codec: String,

    /// Extra arguments passed to ffmpeg before the output path
    pub extra_args: Vec<String>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            mode: VideoMode::Remux,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl VideoConfig {
    fn validate(&self) -> Result<()> {
        if self.mode == VideoMode::Reencode {
            if self.video_codec.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "video.video_codec".to_string(),
                    value: self.video_codec.clone()
                }.into());
            }

            if self.audio_codec.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "video.audio_codec".to_string(),
                    value: self.audio_codec.clone()
                }.into());
            }
        }

        Ok(())
    }
}

/// Metadata copy configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Fail when the transcoded image carries no readable EXIF block,
    /// instead of treating it as empty
    pub strict_destination: bool,
}
