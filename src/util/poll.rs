use std::future::Future;

use tokio::runtime::Handle;

use crate::{model::error::TerminateError, util::deadline::Deadline};

/// Blocks the calling thread on `future`, giving up when the deadline
/// expires or the run is cancelled. Must not be called from async code.
pub fn poll_until_ready<Fut, T>(
    handle: &Handle,
    deadline: &Deadline,
    future: Fut,
) -> Result<T, TerminateError>
where
    Fut: Future<Output = T>,
{
    deadline.check()?;

    handle.block_on(async {
        tokio::select! {
            out = future => Ok(out),
            _ = deadline.cancelled() => Err(TerminateError::Cancelled),
            _ = deadline.expired() => Err(TerminateError::DeadlineExceeded),
        }
    })
}
