use async_trait::async_trait;
use rusoto_ec2::{Ec2, Ec2Client, Filter, Instance};

use crate::error::InstanceSchedulerError;
use crate::region::AwsRegion;
use rusoto_ec2::{DescribeInstancesRequest, StartInstancesRequest, StopInstancesRequest};
use std::fmt;
use std::fmt::{Display, Formatter};

const STATE_FILTER: &str = "instance-state-name";
const SCANNED_STATES: [&str; 2] = ["running", "stopped"];
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceState {
    Running,
    Stopped,
    Other(String),
    Unknown,
}

impl InstanceState {
    fn from_name(name: Option<String>) -> Self {
        match name.as_deref() {
            Some("running") => InstanceState::Running,
            Some("stopped") => InstanceState::Stopped,
            Some(other) => InstanceState::Other(other.to_string()),
            None => InstanceState::Unknown,
        }
    }

    /// States outside running/stopped never take part in a run.
    pub fn is_scanned(&self) -> bool {
        !matches!(self, InstanceState::Other(_))
    }
}

impl Display for InstanceState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            InstanceState::Running => write!(f, "running"),
            InstanceState::Stopped => write!(f, "stopped"),
            InstanceState::Other(ref name) => write!(f, "{}", name),
            InstanceState::Unknown => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MachineInstance {
    pub region: String,
    pub instance_id: String,
    pub state: InstanceState,
    pub instance_type: String,
}

#[async_trait]
pub trait Describe: Send + Sync {
    async fn describe_instances(&self) -> Result<Vec<MachineInstance>, InstanceSchedulerError>;
}

#[async_trait]
pub trait Control: Send + Sync {
    async fn start_instances(&self, instance_ids: &[String]) -> Result<(), InstanceSchedulerError>;
    async fn stop_instances(&self, instance_ids: &[String]) -> Result<(), InstanceSchedulerError>;
}

/// Opens a regional client for each region of a run.
pub trait Connect: Send + Sync {
    type Client: Describe + Control;

    fn connect(&self, region: &AwsRegion) -> Result<Self::Client, InstanceSchedulerError>;
}

pub struct Ec2InstanceClient {
    region: String,
    client: Ec2Client,
}

#[async_trait]
impl Describe for Ec2InstanceClient {
    async fn describe_instances(&self) -> Result<Vec<MachineInstance>, InstanceSchedulerError> {
        let mut machine_instances = Vec::<MachineInstance>::new();
        let mut next_token = None;
        loop {
            let request = DescribeInstancesRequest {
                filters: Some(vec![Filter {
                    name: Some(STATE_FILTER.to_string()),
                    values: Some(SCANNED_STATES.iter().map(|state| state.to_string()).collect()),
                }]),
                next_token: next_token.take(),
                ..DescribeInstancesRequest::default()
            };

            let result = self.client.describe_instances(request).await?;

            for reservation in result.reservations.unwrap_or_default() {
                for instance in reservation.instances.unwrap_or_default() {
                    if let Some(machine_instance) = self.machine_instance(instance) {
                        machine_instances.push(machine_instance);
                    }
                }
            }

            match result.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
        Ok(machine_instances)
    }
}

#[async_trait]
impl Control for Ec2InstanceClient {
    async fn start_instances(&self, instance_ids: &[String]) -> Result<(), InstanceSchedulerError> {
        self.client
            .start_instances(StartInstancesRequest {
                instance_ids: instance_ids.to_vec(),
                ..StartInstancesRequest::default()
            })
            .await?;
        Ok(())
    }

    async fn stop_instances(&self, instance_ids: &[String]) -> Result<(), InstanceSchedulerError> {
        self.client
            .stop_instances(StopInstancesRequest {
                instance_ids: instance_ids.to_vec(),
                ..StopInstancesRequest::default()
            })
            .await?;
        Ok(())
    }
}

impl Ec2InstanceClient {
    pub fn new(region: &AwsRegion) -> Result<Self, InstanceSchedulerError> {
        let client = Ec2Client::new(region.to_rusoto_region()?);
        Ok(Self::new_with_client(&region.name, client))
    }

    fn new_with_client(region: &str, client: Ec2Client) -> Self {
        Ec2InstanceClient {
            region: region.to_string(),
            client,
        }
    }

    fn machine_instance(&self, instance: Instance) -> Option<MachineInstance> {
        let state = InstanceState::from_name(instance.state.and_then(|state| state.name));
        if !state.is_scanned() {
            return None;
        }
        Some(MachineInstance {
            region: self.region.clone(),
            instance_id: instance.instance_id?,
            state,
            instance_type: instance
                .instance_type
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
    }
}

pub struct Ec2Connector;

impl Connect for Ec2Connector {
    type Client = Ec2InstanceClient;

    fn connect(&self, region: &AwsRegion) -> Result<Ec2InstanceClient, InstanceSchedulerError> {
        Ec2InstanceClient::new(region)
    }
}
