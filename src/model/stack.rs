use std::fmt;

pub const STORAGE_BUCKET_TYPE: &str = "AWS::S3::Bucket";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackResource {
    pub logical_id: String,
    pub resource_type: String,
    /// Absent while the resource has not been created.
    pub physical_id: Option<String>,
}

/// Resource kinds that need cleanup before their stack can be deleted.
/// New kinds get a variant here and a handler in the classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceKind<'a> {
    StorageBucket { bucket: Option<&'a str> },
    Other { resource_type: &'a str },
}

impl StackResource {
    pub fn kind(&self) -> ResourceKind<'_> {
        match self.resource_type.as_str() {
            STORAGE_BUCKET_TYPE => ResourceKind::StorageBucket {
                bucket: self.physical_id.as_deref().filter(|id| !id.is_empty()),
            },
            other => ResourceKind::Other {
                resource_type: other,
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PurgeOutcome {
    pub pages: usize,
    pub versions_deleted: usize,
    pub markers_deleted: usize,
}

impl PurgeOutcome {
    pub fn deleted_count(&self) -> usize {
        self.versions_deleted + self.markers_deleted
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminationReport {
    pub stack: String,
    pub resources: usize,
    pub buckets_purged: usize,
    pub objects_deleted: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    ResolveResources,
    PurgeResources,
    DeleteStack,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::ResolveResources => "resolve_resources",
            Phase::PurgeResources => "purge_resources",
            Phase::DeleteStack => "delete_stack",
        };
        f.write_str(name)
    }
}
