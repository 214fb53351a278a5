use std::{collections::VecDeque, sync::Mutex};

use crate::{
    adapters,
    model::{
        error::TerminateError,
        listing::{BatchReport, ListingPage, VersionCursor, VersionedObjectRef},
        stack::StackResource,
    },
    util::deadline::Deadline,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    ListObjectVersions {
        bucket: String,
        page_size: i32,
        cursor: Option<VersionCursor>,
    },
    DeleteObjects {
        bucket: String,
        refs: Vec<VersionedObjectRef>,
    },
    ListResources {
        stack_name: String,
    },
    DeleteStack {
        stack_name: String,
    },
}

/// Replays scripted pages in order. Deletes succeed unless a failure is queued.
#[derive(Default)]
pub struct MockBuckets {
    pub pages: Mutex<VecDeque<Result<ListingPage, TerminateError>>>,
    pub deletes: Mutex<VecDeque<Result<BatchReport, TerminateError>>>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockBuckets {
    pub fn with_pages(pages: Vec<ListingPage>) -> Self {
        Self {
            pages: Mutex::new(pages.into_iter().map(Ok).collect()),
            ..Default::default()
        }
    }

    pub fn push_delete(&self, res: Result<BatchReport, TerminateError>) {
        self.deletes.lock().unwrap().push_back(res);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<Vec<VersionedObjectRef>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DeleteObjects { refs, .. } => Some(refs),
                _ => None,
            })
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::ListObjectVersions { .. }))
            .count()
    }
}

impl adapters::BucketService for MockBuckets {
    fn list_object_versions(
        &self,
        bucket: &str,
        page_size: i32,
        cursor: Option<&VersionCursor>,
        _deadline: &Deadline,
    ) -> Result<ListingPage, TerminateError> {
        self.calls.lock().unwrap().push(Call::ListObjectVersions {
            bucket: bucket.to_string(),
            page_size,
            cursor: cursor.cloned(),
        });

        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ListingPage::default()))
    }

    fn delete_objects(
        &self,
        bucket: &str,
        refs: &[VersionedObjectRef],
        _deadline: &Deadline,
    ) -> Result<BatchReport, TerminateError> {
        self.calls.lock().unwrap().push(Call::DeleteObjects {
            bucket: bucket.to_string(),
            refs: refs.to_vec(),
        });

        self.deletes.lock().unwrap().pop_front().unwrap_or(Ok(BatchReport {
            deleted: refs.len(),
            failures: Vec::new(),
        }))
    }
}

pub struct MockStacks {
    pub resources: Mutex<Option<Result<Vec<StackResource>, TerminateError>>>,
    pub delete_result: Mutex<Result<(), TerminateError>>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockStacks {
    pub fn with_resources(resources: Vec<StackResource>) -> Self {
        Self {
            resources: Mutex::new(Some(Ok(resources))),
            delete_result: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_with(err: TerminateError) -> Self {
        Self {
            resources: Mutex::new(Some(Err(err))),
            delete_result: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl adapters::StackService for MockStacks {
    fn list_resources(
        &self,
        stack_name: &str,
        _deadline: &Deadline,
    ) -> Result<Vec<StackResource>, TerminateError> {
        self.calls.lock().unwrap().push(Call::ListResources {
            stack_name: stack_name.to_string(),
        });

        self.resources
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn delete_stack(&self, stack_name: &str, _deadline: &Deadline) -> Result<(), TerminateError> {
        self.calls.lock().unwrap().push(Call::DeleteStack {
            stack_name: stack_name.to_string(),
        });

        self.delete_result.lock().unwrap().clone()
    }
}
