use std::process::ExitCode;

use aws_config::{meta::region::RegionProviderChain, BehaviorVersion, Region};
use clap::Parser;
use tracing::{info, span, Level};

mod adapters;
mod classify;
mod config;
mod model;
mod purge;
mod terminate;
mod util;

use crate::{
    adapters::{cloudformation::CloudFormationStacks, s3::S3Buckets},
    classify::ResourceClassifier,
    config::{Cli, Command, DeleteArgs},
    model::error::TerminateError,
    terminate::StackTerminator,
    util::deadline::Deadline,
};

fn init_logging(quiet: bool) {
    let level = if quiet { Level::WARN } else { Level::INFO };
    tracing_subscriber::fmt()
        .json()
        .with_max_level(level)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let res = match cli.command {
        Command::Delete(args) => {
            init_logging(args.quiet);
            delete(&args)
        }
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn delete(args: &DeleteArgs) -> Result<(), TerminateError> {
    let settings = args.settings()?;

    let span = span!(Level::INFO, "main", context = "delete");
    let _e = span.enter();
    info!(
        stack = %settings.stack_name,
        region = settings.region.as_deref().unwrap_or("default"),
        page_size = settings.purge.page_size,
        "args"
    );

    let runtime = tokio::runtime::Runtime::new().map_err(|err| {
        TerminateError::provider("start_runtime", &settings.stack_name, err.to_string())
    })?;
    let handle = runtime.handle().clone();

    let (deadline, canceller) = Deadline::new(settings.timeout);
    handle.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let region = RegionProviderChain::first_try(settings.region.clone().map(Region::new))
        .or_default_provider();
    let sdk_config = util::poll::poll_until_ready(
        &handle,
        &deadline,
        aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load(),
    )?;

    let buckets = S3Buckets::new(aws_sdk_s3::Client::new(&sdk_config), handle.clone());
    let stacks = CloudFormationStacks::new(
        aws_sdk_cloudformation::Client::new(&sdk_config),
        handle.clone(),
    );

    let terminator = StackTerminator::new(
        &stacks,
        ResourceClassifier::new(&buckets, settings.purge),
    );

    let report = terminator.terminate(&settings.stack_name, &deadline)?;
    info!(
        stack = %report.stack,
        resources = report.resources,
        buckets = report.buckets_purged,
        count = report.objects_deleted,
        "done"
    );

    Ok(())
}
