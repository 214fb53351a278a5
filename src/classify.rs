use tracing::info;

use crate::{
    adapters::BucketService,
    model::{
        error::TerminateError,
        stack::{PurgeOutcome, ResourceKind, StackResource},
    },
    purge::{BucketPurger, PurgeSettings},
    util::deadline::Deadline,
};

/// Runs the pre-deletion cleanup each resource kind needs.
pub struct ResourceClassifier<'a> {
    buckets: &'a dyn BucketService,
    settings: PurgeSettings,
}

impl<'a> ResourceClassifier<'a> {
    pub fn new(buckets: &'a dyn BucketService, settings: PurgeSettings) -> Self {
        Self { buckets, settings }
    }

    /// Returns the purge outcome for buckets, `None` for everything left alone.
    pub fn prepare(
        &self,
        resource: &StackResource,
        deadline: &Deadline,
    ) -> Result<Option<PurgeOutcome>, TerminateError> {
        match resource.kind() {
            ResourceKind::StorageBucket {
                bucket: Some(bucket),
            } => BucketPurger::new(self.buckets, bucket, self.settings)
                .purge(deadline)
                .map(Some),
            ResourceKind::StorageBucket { bucket: None } => {
                info!(
                    logical_id = %resource.logical_id,
                    "bucket was never created, nothing to purge"
                );
                Ok(None)
            }
            ResourceKind::Other { resource_type } => {
                info!(
                    logical_id = %resource.logical_id,
                    resource_type, "ignoring resource"
                );
                Ok(None)
            }
        }
    }
}
