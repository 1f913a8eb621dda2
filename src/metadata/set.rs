use std::collections::BTreeMap;
use std::fmt;

use little_exif::exif_tag::ExifTag;

/// Identity of an EXIF field: the IFD group it lives in plus its numeric tag id
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagKey {
    pub group: String,
    pub id: u16,
}

impl TagKey {
    pub fn of(tag: &ExifTag) -> Self {
        Self {
            group: format!("{:?}", tag.get_group()),
            id: tag.as_u16(),
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.0x{:04X}", self.group, self.id)
    }
}

/// Counts produced by [`MetadataSet::merge_from`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Source keys the destination did not have
    pub inserted: usize,
    /// Source keys that replaced a destination value
    pub overwritten: usize,
    /// Destination keys absent from the source, left untouched
    pub preserved: usize,
}

impl MergeStats {
    pub fn copied(&self) -> usize {
        self.inserted + self.overwritten
    }
}

/// EXIF fields of one image, keyed by [`TagKey`]
#[derive(Debug, Clone, Default)]
pub struct MetadataSet {
    tags: BTreeMap<TagKey, ExifTag>,
}

impl MetadataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, returning the value it replaced
    pub fn insert(&mut self, tag: ExifTag) -> Option<ExifTag> {
        self.tags.insert(TagKey::of(&tag), tag)
    }

    pub fn get(&self, key: &TagKey) -> Option<&ExifTag> {
        self.tags.get(key)
    }

    pub fn contains_key(&self, key: &TagKey) -> bool {
        self.tags.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &TagKey> {
        self.tags.keys()
    }

    pub fn tags(&self) -> impl Iterator<Item = &ExifTag> {
        self.tags.values()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Overwrite-only union: every source key is set on `self` with the
    /// source's value, and keys only `self` has are kept. Nothing is removed.
    pub fn merge_from(&mut self, source: &MetadataSet) -> MergeStats {
        let preserved = self
            .tags
            .keys()
            .filter(|key| !source.tags.contains_key(key))
            .count();

        let mut stats = MergeStats {
            preserved,
            ..MergeStats::default()
        };

        for (key, tag) in &source.tags {
            match self.tags.insert(key.clone(), tag.clone()) {
                Some(_) => stats.overwritten += 1,
                None => stats.inserted += 1,
            }
        }

        stats
    }
}

impl FromIterator<ExifTag> for MetadataSet {
    fn from_iter<I: IntoIterator<Item = ExifTag>>(iter: I) -> Self {
        let mut set = MetadataSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}
