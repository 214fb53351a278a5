/// One version of one object, or one delete marker. Both share this shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionedObjectRef {
    pub key: String,
    pub version_id: String,
}

impl VersionedObjectRef {
    pub fn new(key: &str, version_id: &str) -> Self {
        Self {
            key: key.to_string(),
            version_id: version_id.to_string(),
        }
    }
}

/// Continuation point of a version listing. The backend pairs both markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionCursor {
    pub key_marker: String,
    pub version_id_marker: String,
}

impl VersionCursor {
    /// Returns `None` when the key marker is absent or empty, which ends the listing.
    pub fn from_markers(key_marker: Option<&str>, version_id_marker: Option<&str>) -> Option<Self> {
        match key_marker {
            Some(key) if !key.is_empty() => Some(Self {
                key_marker: key.to_string(),
                version_id_marker: version_id_marker.unwrap_or("").to_string(),
            }),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub versions: Vec<VersionedObjectRef>,
    pub delete_markers: Vec<VersionedObjectRef>,
    pub next_cursor: Option<VersionCursor>,
}

impl ListingPage {
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty() && self.delete_markers.is_empty()
    }

    /// Versions first, then delete markers.
    pub fn into_refs(self) -> Vec<VersionedObjectRef> {
        let mut refs = self.versions;
        refs.extend(self.delete_markers);
        refs
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectFailure {
    pub key: String,
    pub version_id: String,
    pub code: String,
    pub message: String,
}

/// Result of one bulk delete that succeeded at the transport level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub deleted: usize,
    pub failures: Vec<ObjectFailure>,
}
