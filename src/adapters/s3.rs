use aws_sdk_s3::{
    error::DisplayErrorContext,
    types::{Delete, ObjectIdentifier},
};
use tokio::runtime::Handle;

use crate::{
    adapters,
    model::{
        error::TerminateError,
        listing::{BatchReport, ListingPage, ObjectFailure, VersionCursor, VersionedObjectRef},
    },
    util::{self, deadline::Deadline},
};

/// S3 reports this version id for objects written before versioning was enabled.
const NULL_VERSION: &str = "null";

pub struct S3Buckets {
    client: aws_sdk_s3::Client,
    handle: Handle,
}

impl S3Buckets {
    pub fn new(client: aws_sdk_s3::Client, handle: Handle) -> Self {
        Self { client, handle }
    }
}

fn object_ref(key: Option<&str>, version_id: Option<&str>) -> Option<VersionedObjectRef> {
    let key = key?;
    Some(VersionedObjectRef::new(key, version_id.unwrap_or(NULL_VERSION)))
}

impl adapters::BucketService for S3Buckets {
    fn list_object_versions(
        &self,
        bucket: &str,
        page_size: i32,
        cursor: Option<&VersionCursor>,
        deadline: &Deadline,
    ) -> Result<ListingPage, TerminateError> {
        let mut req = self
            .client
            .list_object_versions()
            .bucket(bucket)
            .max_keys(page_size);

        if let Some(cur) = cursor {
            req = req.key_marker(&cur.key_marker);
            if !cur.version_id_marker.is_empty() {
                req = req.version_id_marker(&cur.version_id_marker);
            }
        }

        let lo = util::poll::poll_until_ready(&self.handle, deadline, req.send())?.map_err(
            |err| {
                TerminateError::provider(
                    "list_object_versions",
                    bucket,
                    DisplayErrorContext(&err).to_string(),
                )
            },
        )?;

        let versions = lo
            .versions()
            .iter()
            .filter_map(|v| object_ref(v.key(), v.version_id()))
            .collect();
        let delete_markers = lo
            .delete_markers()
            .iter()
            .filter_map(|m| object_ref(m.key(), m.version_id()))
            .collect();

        Ok(ListingPage {
            versions,
            delete_markers,
            next_cursor: VersionCursor::from_markers(
                lo.next_key_marker(),
                lo.next_version_id_marker(),
            ),
        })
    }

    fn delete_objects(
        &self,
        bucket: &str,
        refs: &[VersionedObjectRef],
        deadline: &Deadline,
    ) -> Result<BatchReport, TerminateError> {
        let mut ids = Vec::with_capacity(refs.len());
        for r in refs {
            let id = ObjectIdentifier::builder()
                .key(&r.key)
                .version_id(&r.version_id)
                .build()
                .map_err(|err| TerminateError::provider("delete_objects", bucket, err.to_string()))?;
            ids.push(id);
        }

        let delete = Delete::builder()
            .set_objects(Some(ids))
            .build()
            .map_err(|err| TerminateError::provider("delete_objects", bucket, err.to_string()))?;

        let req = self.client.delete_objects().bucket(bucket).delete(delete);

        let out = util::poll::poll_until_ready(&self.handle, deadline, req.send())?.map_err(
            |err| {
                TerminateError::provider(
                    "delete_objects",
                    bucket,
                    DisplayErrorContext(&err).to_string(),
                )
            },
        )?;

        let failures = out
            .errors()
            .iter()
            .map(|e| ObjectFailure {
                key: e.key().unwrap_or("").to_string(),
                version_id: e.version_id().unwrap_or("").to_string(),
                code: e.code().unwrap_or("").to_string(),
                message: e.message().unwrap_or("").to_string(),
            })
            .collect();

        Ok(BatchReport {
            deleted: out.deleted().len(),
            failures,
        })
    }
}
