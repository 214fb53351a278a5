use crate::{
    model::{
        error::TerminateError,
        listing::{BatchReport, ListingPage, VersionCursor, VersionedObjectRef},
        stack::StackResource,
    },
    util::deadline::Deadline,
};

pub mod cloudformation;
#[cfg(test)]
pub mod mock;
pub mod s3;

/// Versioned object storage.
pub trait BucketService {
    /// One page of versions and delete markers. `cursor` is `None` on the first call.
    fn list_object_versions(
        &self,
        bucket: &str,
        page_size: i32,
        cursor: Option<&VersionCursor>,
        deadline: &Deadline,
    ) -> Result<ListingPage, TerminateError>;

    /// Bulk delete. `Err` only when the request itself fails; per-object
    /// failures are carried in the report.
    fn delete_objects(
        &self,
        bucket: &str,
        refs: &[VersionedObjectRef],
        deadline: &Deadline,
    ) -> Result<BatchReport, TerminateError>;
}

/// Stack description and deletion.
pub trait StackService {
    fn list_resources(
        &self,
        stack_name: &str,
        deadline: &Deadline,
    ) -> Result<Vec<StackResource>, TerminateError>;

    fn delete_stack(&self, stack_name: &str, deadline: &Deadline) -> Result<(), TerminateError>;
}
