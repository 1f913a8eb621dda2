use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use little_exif::metadata::Metadata;
use tracing::{debug, info, warn};

use super::set::{MergeStats, MetadataSet};
use crate::config::MetadataConfig;
use crate::error::{MetadataError, Result};

/// Outcome of a metadata copy
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyReport {
    /// Number of tags read from the source image
    pub source_tags: usize,
    /// Number of tags on the destination after the copy
    pub destination_tags: usize,
    pub merge: MergeStats,
}

/// How a little_exif call went wrong
#[derive(Debug)]
enum LibraryFailure {
    /// The library returned an error
    Error(std::io::Error),
    /// The library panicked
    Panic(String),
}

impl fmt::Display for LibraryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(e) => write!(f, "{}", e),
            Self::Panic(detail) => write!(f, "metadata library panicked: {}", detail),
        }
    }
}

/// Runs a little_exif call, catching panics as well as errors.
///
/// little_exif can panic on containers it only partially understands, which
/// must not take the whole process down.
fn guarded<T, F>(f: F) -> std::result::Result<T, LibraryFailure>
where
    F: FnOnce() -> std::io::Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(LibraryFailure::Error(e)),
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(LibraryFailure::Panic(detail))
        }
    }
}

/// Whether the file starts with the signature of an image format the `image`
/// crate recognizes
fn has_image_signature(path: &Path) -> bool {
    image::io::Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map(|reader| reader.format().is_some())
        .unwrap_or(false)
}

/// Read every EXIF tag embedded in the image at `path`.
///
/// A recognizable image without an EXIF block yields an empty set. Missing
/// files, unrecognized content, and library panics are `ReadFailed`.
pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<MetadataSet> {
    let path = path.as_ref();
    let read_failed = |reason: String| MetadataError::ReadFailed {
        path: path.display().to_string(),
        reason,
    };

    if !path.exists() {
        return Err(read_failed("file not found".to_string()).into());
    }

    let set: MetadataSet = match guarded(|| Metadata::new_from_path(path)) {
        Ok(metadata) => (&metadata).into_iter().cloned().collect(),
        Err(LibraryFailure::Error(e)) if has_image_signature(path) => {
            debug!("No EXIF block in {:?} ({})", path, e);
            MetadataSet::new()
        }
        Err(failure) => return Err(read_failed(failure.to_string()).into()),
    };

    debug!("Read {} EXIF tags from {:?}", set.len(), path);
    Ok(set)
}

/// Persist `set` into the image at `path`.
///
/// Tags already embedded in the file but absent from `set` are kept; tags in
/// `set` overwrite the embedded ones.
pub fn write_metadata<P: AsRef<Path>>(path: P, set: &MetadataSet) -> Result<()> {
    let path = path.as_ref();

    let mut metadata = match guarded(|| Metadata::new_from_path(path)) {
        Ok(existing) => existing,
        Err(failure) => {
            debug!("No existing EXIF block in {:?} ({}), starting empty", path, failure);
            Metadata::new()
        }
    };

    for tag in set.tags() {
        metadata.set_tag(tag.clone());
    }

    guarded(|| metadata.write_to_file(path)).map_err(|failure| MetadataError::WriteFailed {
        path: path.display().to_string(),
        reason: failure.to_string(),
    })?;

    Ok(())
}

/// Copies EXIF fields from an original still onto its transcoded counterpart
pub struct MetadataCopier {
    config: MetadataConfig,
}

impl MetadataCopier {
    pub fn new(config: MetadataConfig) -> Self {
        Self { config }
    }

    /// Copy every source tag onto `dst`, in place.
    ///
    /// The destination must already exist. When it carries no readable EXIF
    /// block it is treated as empty, unless `strict_destination` is set.
    pub fn copy<P: AsRef<Path>>(&self, src: P, dst: P) -> Result<CopyReport> {
        let src = src.as_ref();
        let dst = dst.as_ref();

        let source = read_metadata(src)?;
        let mut destination = self.read_destination(dst)?;

        let merge = destination.merge_from(&source);
        debug!(
            "Merged EXIF: {} inserted, {} overwritten, {} preserved",
            merge.inserted, merge.overwritten, merge.preserved
        );

        write_metadata(dst, &destination)?;

        info!("Copied EXIF metadata from {} to {}", src.display(), dst.display());

        Ok(CopyReport {
            source_tags: source.len(),
            destination_tags: destination.len(),
            merge,
        })
    }

    fn read_destination(&self, dst: &Path) -> Result<MetadataSet> {
        if !dst.exists() {
            return Err(MetadataError::ReadFailed {
                path: dst.display().to_string(),
                reason: "file not found".to_string(),
            }.into());
        }

        match read_metadata(dst) {
            Ok(set) => Ok(set),
            Err(e) if !self.config.strict_destination => {
                warn!("Treating {:?} as having no EXIF: {}", dst, e);
                Ok(MetadataSet::new())
            }
            Err(e) => Err(e),
        }
    }
}
