use thiserror::Error;

/// Main error type for the motion-to-live converter
#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("Missing input file: {path}")]
    MissingInput { path: String },

    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),

    #[error("Video processing error: {0}")]
    Video(#[from] VideoError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Still image errors
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to decode image {path}: {reason}")]
    DecodeFailed { path: String, reason: String },

    #[error("Failed to write image {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("HEIC encoder not available: {tool}")]
    EncoderUnavailable { tool: String },
}

/// Video errors
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Video transcoding failed: {reason}")]
    TranscodeFailed { reason: String },

    #[error("Video transcoder not available: {tool}")]
    ToolUnavailable { tool: String },
}

/// EXIF metadata errors
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to read metadata from {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Failed to write metadata to {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using ConverterError
pub type Result<T> = std::result::Result<T, ConverterError>;

impl ConverterError {
    pub fn missing_input<P: AsRef<std::path::Path>>(path: P) -> Self {
        Self::MissingInput {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Short name of the failure class, stable across messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "missing-input",
            Self::Image(ImageError::DecodeFailed { .. }) => "decode-error",
            Self::Image(_) => "image-write-error",
            Self::Video(_) => "transcode-error",
            Self::Metadata(MetadataError::ReadFailed { .. }) => "metadata-read-error",
            Self::Metadata(MetadataError::WriteFailed { .. }) => "metadata-write-error",
            Self::Config(_) => "config-error",
            Self::Io(_) => "io-error",
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput { path } => {
                format!(
                    "Input file '{}' not found. The motion photo folder must contain 'image.jpg' and 'video.mp4'.",
                    path
                )
            }
            Self::Image(ImageError::EncoderUnavailable { tool }) => {
                format!("'{}' was not found. Please install libheif (heif-enc) or set image.heif_enc_path.", tool)
            }
            Self::Video(VideoError::ToolUnavailable { tool }) => {
                format!("'{}' was not found. Please install FFmpeg or set video.ffmpeg_path.", tool)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ConverterError::missing_input("a/image.jpg").kind(), "missing-input");

        let decode: ConverterError = ImageError::DecodeFailed {
            path: "image.jpg".to_string(),
            reason: "truncated".to_string(),
        }
        .into();
        assert_eq!(decode.kind(), "decode-error");

        let transcode: ConverterError = VideoError::TranscodeFailed {
            reason: "exit status 1".to_string(),
        }
        .into();
        assert_eq!(transcode.kind(), "transcode-error");

        let write: ConverterError = MetadataError::WriteFailed {
            path: "image.heic".to_string(),
            reason: "unsupported".to_string(),
        }
        .into();
        assert_eq!(write.kind(), "metadata-write-error");
    }

    #[test]
    fn test_missing_input_message_names_file() {
        let err = ConverterError::missing_input("bundle/video.mp4");
        assert!(err.to_string().contains("bundle/video.mp4"));
        assert!(err.user_message().contains("image.jpg"));
    }
}
