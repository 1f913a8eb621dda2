//! # Metadata Copy
//!
//! Reads EXIF fields from the original still and commits them onto the
//! transcoded HEIC with overwrite-only semantics: source values win, fields
//! only the destination has are kept.

pub mod copier;
pub mod set;

pub use copier::{read_metadata, write_metadata, CopyReport, MetadataCopier};
pub use set::{MergeStats, MetadataSet, TagKey};
