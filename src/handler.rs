use crate::config::Config;
use crate::ec2_instance_client::Connect;
use crate::error::InstanceSchedulerError;
use crate::inventory::scan_regions;
use crate::region::ListRegions;
use crate::schedule::Clock;
use crate::slack_notifier::{notify_summary, Notify};
use crate::summary::{Summary, TOTAL_LABEL};
use serde::Serialize;
use tracing::info;

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHandlerOutput {
    pub status_code: u16,
    pub body: String,
}

impl ReportHandlerOutput {
    fn for_total(total_instances: usize) -> Self {
        let message = format!("{}: {}", TOTAL_LABEL, total_instances);
        ReportHandlerOutput {
            status_code: 200,
            body: serde_json::Value::String(message).to_string(),
        }
    }
}

pub struct InstanceScheduler<L, C, N, K> {
    config: Config,
    regions: L,
    connector: C,
    notifier: N,
    clock: K,
}

impl<L, C, N, K> InstanceScheduler<L, C, N, K>
where
    L: ListRegions,
    C: Connect,
    N: Notify,
    K: Clock,
{
    pub fn new(config: Config, regions: L, connector: C, notifier: N, clock: K) -> Self {
        InstanceScheduler {
            config,
            regions,
            connector,
            notifier,
            clock,
        }
    }

    /// One full pass: resolve action, scan every region, notify.
    pub async fn run(&self) -> Result<ReportHandlerOutput, InstanceSchedulerError> {
        let action = self.config.action_policy.resolve(&self.clock);
        let regions = self.config.region_source.enumerate(&self.regions).await?;
        info!(%action, regions = regions.len(), "starting instance scan");

        let reports = scan_regions(&self.connector, &regions, action).await;
        let summary = Summary::build(&reports, action);
        let delivery =
            notify_summary(&self.notifier, self.config.webhook_url.as_deref(), &summary).await?;
        info!(
            total = summary.total_instances,
            started = summary.started.len(),
            stopped = summary.stopped.len(),
            ?delivery,
            "instance scan finished"
        );

        Ok(ReportHandlerOutput::for_total(summary.total_instances))
    }
}
