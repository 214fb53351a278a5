use tracing::{debug, warn};

use crate::{
    adapters::BucketService,
    model::{error::TerminateError, listing::VersionedObjectRef},
    purge::BatchFailurePolicy,
    util::deadline::Deadline,
};

/// Issues one bulk delete per batch of references.
pub struct ObjectBatchDeleter<'a> {
    service: &'a dyn BucketService,
    bucket: &'a str,
    policy: BatchFailurePolicy,
}

impl<'a> ObjectBatchDeleter<'a> {
    pub fn new(service: &'a dyn BucketService, bucket: &'a str, policy: BatchFailurePolicy) -> Self {
        Self {
            service,
            bucket,
            policy,
        }
    }

    /// No request is made for an empty batch.
    pub fn delete_batch(
        &self,
        refs: &[VersionedObjectRef],
        deadline: &Deadline,
    ) -> Result<(), TerminateError> {
        if refs.is_empty() {
            return Ok(());
        }

        deadline.check()?;

        let report = self.service.delete_objects(self.bucket, refs, deadline)?;
        debug!(
            bucket = self.bucket,
            requested = refs.len(),
            deleted = report.deleted,
            failed = report.failures.len(),
            "deleted batch"
        );

        for f in &report.failures {
            warn!(
                bucket = self.bucket,
                key = %f.key,
                version_id = %f.version_id,
                code = %f.code,
                error_message = %f.message,
                "object not deleted"
            );
        }

        match (self.policy, report.failures.first()) {
            (BatchFailurePolicy::Strict, Some(first)) => Err(TerminateError::provider(
                "delete_objects",
                self.bucket,
                format!(
                    "{} of {} objects not deleted, first {}@{}: {} {}",
                    report.failures.len(),
                    refs.len(),
                    first.key,
                    first.version_id,
                    first.code,
                    first.message
                ),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::mock::MockBuckets,
        model::listing::{BatchReport, ObjectFailure},
    };

    fn partial_failure() -> BatchReport {
        BatchReport {
            deleted: 1,
            failures: vec![ObjectFailure {
                key: "Dk".to_string(),
                version_id: "Did".to_string(),
                code: "AccessDenied".to_string(),
                message: "Access Denied".to_string(),
            }],
        }
    }

    fn refs() -> Vec<VersionedObjectRef> {
        vec![
            VersionedObjectRef::new("Vk", "Vid"),
            VersionedObjectRef::new("Dk", "Did"),
        ]
    }

    #[test]
    fn test_empty_batch_makes_no_call() {
        let client = MockBuckets::default();
        let deleter = ObjectBatchDeleter::new(&client, "bob-bucket", BatchFailurePolicy::Strict);

        assert_eq!(deleter.delete_batch(&[], &Deadline::unbounded()), Ok(()));
        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_request_failure_propagates() {
        let client = MockBuckets::default();
        let err = TerminateError::provider("delete_objects", "bob-bucket", "throttled");
        client.push_delete(Err(err.clone()));
        let deleter =
            ObjectBatchDeleter::new(&client, "bob-bucket", BatchFailurePolicy::Permissive);

        assert_eq!(deleter.delete_batch(&refs(), &Deadline::unbounded()), Err(err));
    }

    #[test]
    fn test_partial_failure_by_policy() {
        let cases = vec![
            (BatchFailurePolicy::Permissive, true),
            (BatchFailurePolicy::Strict, false),
        ];

        for (policy, expect_ok) in cases {
            let client = MockBuckets::default();
            client.push_delete(Ok(partial_failure()));
            let deleter = ObjectBatchDeleter::new(&client, "bob-bucket", policy);

            let res = deleter.delete_batch(&refs(), &Deadline::unbounded());
            assert_eq!(res.is_ok(), expect_ok);
            assert_eq!(client.delete_calls(), vec![refs()]);
        }
    }
}
