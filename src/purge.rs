use tracing::{info, span, Level};

use crate::{
    adapters::BucketService,
    model::{error::TerminateError, listing::VersionCursor, stack::PurgeOutcome},
    util::deadline::Deadline,
};

pub mod deleter;
pub mod fetcher;

use deleter::ObjectBatchDeleter;
use fetcher::VersionPageFetcher;

/// S3 caps both `MaxKeys` and a single bulk delete at this many entries.
pub const MAX_PAGE_SIZE: i32 = 1000;

/// What to do when a bulk delete succeeds but reports per-object errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchFailurePolicy {
    /// Log and carry on.
    #[default]
    Permissive,
    /// Fail the purge.
    Strict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurgeSettings {
    pub page_size: i32,
    pub batch_failure: BatchFailurePolicy,
}

impl Default for PurgeSettings {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            batch_failure: BatchFailurePolicy::default(),
        }
    }
}

/// Drains every object version and delete marker from one bucket.
///
/// Fetch and delete strictly alternate: a batch only ever contains entries
/// from the page just listed.
pub struct BucketPurger<'a> {
    bucket: &'a str,
    fetcher: VersionPageFetcher<'a>,
    deleter: ObjectBatchDeleter<'a>,
}

impl<'a> BucketPurger<'a> {
    pub fn new(service: &'a dyn BucketService, bucket: &'a str, settings: PurgeSettings) -> Self {
        Self {
            bucket,
            fetcher: VersionPageFetcher::new(service, bucket, settings.page_size),
            deleter: ObjectBatchDeleter::new(service, bucket, settings.batch_failure),
        }
    }

    pub fn purge(&self, deadline: &Deadline) -> Result<PurgeOutcome, TerminateError> {
        let span = span!(Level::INFO, "purge", bucket = self.bucket);
        let _e = span.enter();
        info!("called");

        let mut outcome = PurgeOutcome::default();
        let mut cursor: Option<VersionCursor> = None;

        loop {
            let page = self.fetcher.fetch(cursor.as_ref(), deadline)?;
            outcome.pages += 1;

            // Some backends hand out an empty page before the final one.
            if page.is_empty() {
                break;
            }

            let versions = page.versions.len();
            let markers = page.delete_markers.len();
            let next = page.next_cursor.clone();

            self.deleter.delete_batch(&page.into_refs(), deadline)?;
            outcome.versions_deleted += versions;
            outcome.markers_deleted += markers;

            let Some(next) = next else {
                break;
            };

            if cursor.as_ref() == Some(&next) {
                return Err(TerminateError::provider(
                    "list_object_versions",
                    self.bucket,
                    format!(
                        "listing cursor did not advance past {}@{}",
                        next.key_marker, next.version_id_marker
                    ),
                ));
            }
            cursor = Some(next);
        }

        info!(
            pages = outcome.pages,
            versions = outcome.versions_deleted,
            markers = outcome.markers_deleted,
            count = outcome.deleted_count(),
            "bucket emptied"
        );

        Ok(outcome)
    }
}
