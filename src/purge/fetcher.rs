use tracing::debug;

use crate::{
    adapters::BucketService,
    model::{
        error::TerminateError,
        listing::{ListingPage, VersionCursor},
    },
    util::deadline::Deadline,
};

/// Fetches one page of versions and delete markers at a time.
pub struct VersionPageFetcher<'a> {
    service: &'a dyn BucketService,
    bucket: &'a str,
    page_size: i32,
}

impl<'a> VersionPageFetcher<'a> {
    pub fn new(service: &'a dyn BucketService, bucket: &'a str, page_size: i32) -> Self {
        Self {
            service,
            bucket,
            page_size,
        }
    }

    pub fn fetch(
        &self,
        cursor: Option<&VersionCursor>,
        deadline: &Deadline,
    ) -> Result<ListingPage, TerminateError> {
        deadline.check()?;

        let page = self
            .service
            .list_object_versions(self.bucket, self.page_size, cursor, deadline)?;

        debug!(
            bucket = self.bucket,
            key_marker = cursor.map(|c| c.key_marker.as_str()).unwrap_or(""),
            versions = page.versions.len(),
            markers = page.delete_markers.len(),
            last = page.next_cursor.is_none(),
            "fetched page"
        );

        Ok(page)
    }
}
