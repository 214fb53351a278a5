use tracing::{error, info, span, Level};

use crate::{
    adapters::StackService,
    classify::ResourceClassifier,
    model::{
        error::TerminateError,
        stack::{Phase, TerminationReport},
    },
    util::deadline::Deadline,
};

/// Empties what has to be emptied, then deletes the stack.
///
/// Runs resolve, purge and delete in that order. The first failure ends the
/// run and the stack deletion is never attempted after a failed purge.
pub struct StackTerminator<'a> {
    stacks: &'a dyn StackService,
    classifier: ResourceClassifier<'a>,
}

impl<'a> StackTerminator<'a> {
    pub fn new(stacks: &'a dyn StackService, classifier: ResourceClassifier<'a>) -> Self {
        Self { stacks, classifier }
    }

    pub fn terminate(
        &self,
        stack_name: &str,
        deadline: &Deadline,
    ) -> Result<TerminationReport, TerminateError> {
        let span = span!(Level::INFO, "terminate", stack = stack_name);
        let _e = span.enter();
        info!("called");

        self.run(stack_name, deadline).map_err(|(phase, err)| {
            error!(%phase, error_message = %err, error_group = err.error_group());
            err
        })
    }

    fn run(
        &self,
        stack_name: &str,
        deadline: &Deadline,
    ) -> Result<TerminationReport, (Phase, TerminateError)> {
        let phase = Phase::ResolveResources;
        deadline.check().map_err(|err| (phase, err))?;
        let resources = self
            .stacks
            .list_resources(stack_name, deadline)
            .map_err(|err| (phase, err))?;
        info!(%phase, count = resources.len(), "resources resolved");

        let phase = Phase::PurgeResources;
        let mut report = TerminationReport {
            stack: stack_name.to_string(),
            resources: resources.len(),
            buckets_purged: 0,
            objects_deleted: 0,
        };
        for resource in &resources {
            let outcome = self
                .classifier
                .prepare(resource, deadline)
                .map_err(|err| (phase, err))?;

            if let Some(outcome) = outcome {
                report.buckets_purged += 1;
                report.objects_deleted += outcome.deleted_count();
            }
        }

        let phase = Phase::DeleteStack;
        deadline.check().map_err(|err| (phase, err))?;
        self.stacks
            .delete_stack(stack_name, deadline)
            .map_err(|err| (phase, err))?;

        info!(
            buckets = report.buckets_purged,
            count = report.objects_deleted,
            "stack deletion requested"
        );

        Ok(report)
    }
}
