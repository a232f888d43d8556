use crate::error::InstanceSchedulerError;
use crate::summary::Summary;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

const WEBHOOK_URL_KEY: &str = "SLACK_WEBHOOK_URL";

#[derive(Debug, Serialize)]
struct SlackMessage<'a> {
    text: &'a str,
}

#[async_trait]
pub trait Notify: Send + Sync {
    async fn post_message(
        &self,
        webhook_url: &str,
        text: &str,
    ) -> Result<(), InstanceSchedulerError>;
}

pub struct SlackWebhookClient {
    client: reqwest::Client,
}

#[async_trait]
impl Notify for SlackWebhookClient {
    async fn post_message(
        &self,
        webhook_url: &str,
        text: &str,
    ) -> Result<(), InstanceSchedulerError> {
        let response = self
            .client
            .post(webhook_url)
            .json(&SlackMessage { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstanceSchedulerError::WebhookStatus(status.as_u16()));
        }
        info!(status = status.as_u16(), "posted summary to slack");
        Ok(())
    }
}

impl SlackWebhookClient {
    pub fn new() -> Self {
        Self::new_with_client(reqwest::Client::new())
    }

    fn new_with_client(client: reqwest::Client) -> Self {
        SlackWebhookClient { client }
    }
}

impl Default for SlackWebhookClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq)]
pub enum Delivery {
    Skipped,
    Sent,
    Failed,
}

/// Posts the summary once when it lists any instance.
///
/// A missing webhook URL is only an error when there is something to send.
/// Delivery failures are logged and reported as `Delivery::Failed`.
pub async fn notify_summary<N: Notify>(
    notifier: &N,
    webhook_url: Option<&str>,
    summary: &Summary,
) -> Result<Delivery, InstanceSchedulerError> {
    if summary.total_instances == 0 {
        info!("no instances found, skipping notification");
        return Ok(Delivery::Skipped);
    }
    let webhook_url =
        webhook_url.ok_or(InstanceSchedulerError::MissingConfig(WEBHOOK_URL_KEY))?;

    match notifier.post_message(webhook_url, &summary.text).await {
        Ok(()) => Ok(Delivery::Sent),
        Err(error) => {
            warn!(%error, "failed to deliver slack notification");
            Ok(Delivery::Failed)
        }
    }
}
