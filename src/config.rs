use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::{
    model::error::TerminateError,
    purge::{BatchFailurePolicy, PurgeSettings, MAX_PAGE_SIZE},
};

#[derive(Debug, Parser)]
#[command(name = "stack-terminator", version, about = "Empty a stack's buckets, then delete the stack")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Purge every bucket owned by the stack and delete it
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Name of the stack to delete
    pub stack_name: String,

    /// Target region, defaults to the environment's
    #[arg(long)]
    pub region: Option<String>,

    /// Cap on total time spent in provider calls, e.g. 90, 90s, 5m, 1h. 0 means no deadline
    #[arg(long, value_parser = parse_timeout, default_value = "0")]
    pub timeout: Duration,

    /// Object versions and delete markers listed and deleted per request
    #[arg(long, default_value_t = MAX_PAGE_SIZE)]
    pub page_size: i32,

    /// Fail when a bulk delete reports objects it could not remove
    #[arg(long)]
    pub strict: bool,

    /// Only log warnings and errors
    #[arg(long, short)]
    pub quiet: bool,
}

/// Validated view of `DeleteArgs`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub stack_name: String,
    pub region: Option<String>,
    pub timeout: Option<Duration>,
    pub purge: PurgeSettings,
}

impl DeleteArgs {
    pub fn settings(&self) -> Result<Settings, TerminateError> {
        if self.stack_name.trim().is_empty() {
            return Err(TerminateError::InvalidConfiguration {
                message: "stack name must not be empty".to_string(),
            });
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(TerminateError::InvalidConfiguration {
                message: format!(
                    "page size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, self.page_size
                ),
            });
        }

        let batch_failure = if self.strict {
            BatchFailurePolicy::Strict
        } else {
            BatchFailurePolicy::Permissive
        };

        Ok(Settings {
            stack_name: self.stack_name.clone(),
            region: self.region.clone().filter(|r| !r.is_empty()),
            timeout: Some(self.timeout).filter(|t| !t.is_zero()),
            purge: PurgeSettings {
                page_size: self.page_size,
                batch_failure,
            },
        })
    }
}

/// Seconds, optionally suffixed with `s`, `m` or `h`.
pub fn parse_timeout(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let (number, scale) = match value.char_indices().last() {
        Some((i, 's')) => (&value[..i], 1),
        Some((i, 'm')) => (&value[..i], 60),
        Some((i, 'h')) => (&value[..i], 3600),
        _ => (value, 1),
    };

    let amount: u64 = number
        .parse()
        .map_err(|_| format!("invalid timeout: {}", value))?;

    amount
        .checked_mul(scale)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("timeout too large: {}", value))
}
