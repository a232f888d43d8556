mod config;
mod ec2_instance_client;
mod error;
mod handler;
mod inventory;
mod region;
mod schedule;
mod slack_notifier;
mod summary;
#[cfg(test)]
mod test_support;

use anyhow::Context as _;
use lambda_runtime::{handler_fn, Context, Error};
use serde_json::Value;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::ec2_instance_client::Ec2Connector;
use crate::error::InstanceSchedulerError;
use crate::handler::{InstanceScheduler, ReportHandlerOutput};
use crate::region::Ec2RegionClient;
use crate::schedule::SystemClock;
use crate::slack_notifier::SlackWebhookClient;

type Scheduler = InstanceScheduler<Ec2RegionClient, Ec2Connector, SlackWebhookClient, SystemClock>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        // CloudWatch already stamps every line.
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let regions = Ec2RegionClient::new(&config.home_region)
        .with_context(|| format!("invalid home region {}", config.home_region))?;
    let scheduler = Arc::new(InstanceScheduler::new(
        config,
        regions,
        Ec2Connector,
        SlackWebhookClient::new(),
        SystemClock,
    ));

    lambda_runtime::run(handler_fn(move |event: Value, context: Context| {
        let scheduler = Arc::clone(&scheduler);
        async move { report_handler(&scheduler, event, context).await }
    }))
    .await?;
    Ok(())
}

async fn report_handler(
    scheduler: &Scheduler,
    _: Value,
    context: Context,
) -> Result<ReportHandlerOutput, InstanceSchedulerError> {
    tracing::info!(request_id = %context.request_id, "invoked");
    scheduler.run().await
}
