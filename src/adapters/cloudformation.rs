use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata};
use tokio::runtime::Handle;

use crate::{
    adapters,
    model::{error::TerminateError, stack::StackResource},
    util::{self, deadline::Deadline},
};

pub struct CloudFormationStacks {
    client: aws_sdk_cloudformation::Client,
    handle: Handle,
}

impl CloudFormationStacks {
    pub fn new(client: aws_sdk_cloudformation::Client, handle: Handle) -> Self {
        Self { client, handle }
    }
}

/// CloudFormation signals a missing stack with a generic `ValidationError`.
fn is_stack_missing(code: Option<&str>, message: Option<&str>) -> bool {
    code == Some("ValidationError") && message.is_some_and(|m| m.contains("does not exist"))
}

impl adapters::StackService for CloudFormationStacks {
    fn list_resources(
        &self,
        stack_name: &str,
        deadline: &Deadline,
    ) -> Result<Vec<StackResource>, TerminateError> {
        let mut resources = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let req = self
                .client
                .list_stack_resources()
                .stack_name(stack_name)
                .set_next_token(next_token.take());

            let lr = util::poll::poll_until_ready(&self.handle, deadline, req.send())?.map_err(
                |err| {
                    if let Some(svc_err) = err.as_service_error() {
                        if is_stack_missing(svc_err.code(), svc_err.message()) {
                            return TerminateError::StackNotFound {
                                stack: stack_name.to_string(),
                            };
                        }
                    }

                    TerminateError::provider(
                        "list_stack_resources",
                        stack_name,
                        DisplayErrorContext(&err).to_string(),
                    )
                },
            )?;

            for s in lr.stack_resource_summaries() {
                // Option::from accepts both `&str` and `Option<&str>` accessors.
                let logical_id: Option<&str> = Option::from(s.logical_resource_id());
                let resource_type: Option<&str> = Option::from(s.resource_type());
                let physical_id: Option<&str> = Option::from(s.physical_resource_id());

                resources.push(StackResource {
                    logical_id: logical_id.unwrap_or("").to_string(),
                    resource_type: resource_type.unwrap_or("").to_string(),
                    physical_id: physical_id.map(|id| id.to_string()),
                });
            }

            next_token = lr.next_token().map(|tok| tok.to_string());
            if next_token.is_none() {
                break;
            }
        }

        Ok(resources)
    }

    fn delete_stack(&self, stack_name: &str, deadline: &Deadline) -> Result<(), TerminateError> {
        let req = self.client.delete_stack().stack_name(stack_name);

        util::poll::poll_until_ready(&self.handle, deadline, req.send())?.map_err(|err| {
            TerminateError::provider(
                "delete_stack",
                stack_name,
                DisplayErrorContext(&err).to_string(),
            )
        })?;

        Ok(())
    }
}
