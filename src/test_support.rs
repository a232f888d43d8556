use crate::ec2_instance_client::{Connect, Control, Describe, InstanceState, MachineInstance};
use crate::error::InstanceSchedulerError;
use crate::region::{AwsRegion, ListRegions};
use crate::slack_notifier::Notify;
use async_trait::async_trait;
use rusoto_core::RusotoError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn instance(
    region: &str,
    id: &str,
    state: InstanceState,
    instance_type: &str,
) -> MachineInstance {
    MachineInstance {
        region: region.to_string(),
        instance_id: id.to_string(),
        state,
        instance_type: instance_type.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlCall {
    Start(String, Vec<String>),
    Stop(String, Vec<String>),
}

#[derive(Clone, Default)]
struct FakeRegion {
    instances: Vec<MachineInstance>,
    describe_fails: bool,
    control_fails: bool,
}

/// In-memory fleet that records every describe and control call.
#[derive(Clone, Default)]
pub struct FakeFleet {
    regions: HashMap<String, FakeRegion>,
    pub described: Arc<Mutex<Vec<String>>>,
    pub calls: Arc<Mutex<Vec<ControlCall>>>,
}

impl FakeFleet {
    pub fn with_instances(mut self, region: &str, instances: Vec<MachineInstance>) -> Self {
        self.regions.entry(region.to_string()).or_default().instances = instances;
        self
    }

    pub fn failing_describe(mut self, region: &str) -> Self {
        self.regions.entry(region.to_string()).or_default().describe_fails = true;
        self
    }

    pub fn failing_control(mut self, region: &str) -> Self {
        self.regions.entry(region.to_string()).or_default().control_fails = true;
        self
    }

    pub fn described(&self) -> Vec<String> {
        self.described.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<ControlCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub struct FakeRegionClient {
    region: String,
    data: FakeRegion,
    described: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<ControlCall>>>,
}

impl Connect for FakeFleet {
    type Client = FakeRegionClient;

    fn connect(&self, region: &AwsRegion) -> Result<FakeRegionClient, InstanceSchedulerError> {
        Ok(FakeRegionClient {
            region: region.name.clone(),
            data: self.regions.get(&region.name).cloned().unwrap_or_default(),
            described: Arc::clone(&self.described),
            calls: Arc::clone(&self.calls),
        })
    }
}

#[async_trait]
impl Describe for FakeRegionClient {
    async fn describe_instances(&self) -> Result<Vec<MachineInstance>, InstanceSchedulerError> {
        self.described.lock().unwrap().push(self.region.clone());
        if self.data.describe_fails {
            return Err(InstanceSchedulerError::DescribeInstancesError(
                RusotoError::Validation("AuthFailure".to_string()),
            ));
        }
        Ok(self.data.instances.clone())
    }
}

#[async_trait]
impl Control for FakeRegionClient {
    async fn start_instances(&self, instance_ids: &[String]) -> Result<(), InstanceSchedulerError> {
        self.calls
            .lock()
            .unwrap()
            .push(ControlCall::Start(self.region.clone(), instance_ids.to_vec()));
        if self.data.control_fails {
            return Err(InstanceSchedulerError::StartInstancesError(
                RusotoError::Validation("IncorrectInstanceState".to_string()),
            ));
        }
        Ok(())
    }

    async fn stop_instances(&self, instance_ids: &[String]) -> Result<(), InstanceSchedulerError> {
        self.calls
            .lock()
            .unwrap()
            .push(ControlCall::Stop(self.region.clone(), instance_ids.to_vec()));
        if self.data.control_fails {
            return Err(InstanceSchedulerError::StopInstancesError(
                RusotoError::Validation("IncorrectInstanceState".to_string()),
            ));
        }
        Ok(())
    }
}

pub struct FakeRegionLister(pub Option<Vec<String>>);

#[async_trait]
impl ListRegions for FakeRegionLister {
    async fn list_regions(&self) -> Result<Vec<AwsRegion>, InstanceSchedulerError> {
        let names = self.0.as_ref().ok_or_else(|| {
            InstanceSchedulerError::DescribeRegionsError(RusotoError::Validation(
                "AuthFailure".to_string(),
            ))
        })?;
        Ok(names.iter().map(|name| AwsRegion::named(name)).collect())
    }
}

#[derive(Clone, Default)]
pub struct FakeNotifier {
    pub posts: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        FakeNotifier {
            fail: true,
            ..FakeNotifier::default()
        }
    }

    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notify for FakeNotifier {
    async fn post_message(
        &self,
        webhook_url: &str,
        text: &str,
    ) -> Result<(), InstanceSchedulerError> {
        self.posts
            .lock()
            .unwrap()
            .push((webhook_url.to_string(), text.to_string()));
        if self.fail {
            return Err(InstanceSchedulerError::WebhookStatus(500));
        }
        Ok(())
    }
}
