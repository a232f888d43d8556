use crate::error::InstanceSchedulerError;
use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_ec2::{DescribeRegionsRequest, Ec2, Ec2Client};
use std::str::FromStr;
use tracing::info;

pub const DEFAULT_REGIONS: [&str; 17] = [
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "ap-south-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "sa-east-1",
];

/// A region to scan. Discovered regions carry the EC2 endpoint reported by the
/// provider so regions unknown to rusoto can still be reached.
#[derive(Debug, Clone, PartialEq)]
pub struct AwsRegion {
    pub name: String,
    pub endpoint: Option<String>,
}

impl AwsRegion {
    pub fn named(name: &str) -> Self {
        AwsRegion {
            name: name.to_string(),
            endpoint: None,
        }
    }

    pub fn to_rusoto_region(&self) -> Result<Region, InstanceSchedulerError> {
        match (Region::from_str(&self.name), &self.endpoint) {
            (Ok(region), _) => Ok(region),
            (Err(_), Some(endpoint)) => Ok(Region::Custom {
                name: self.name.clone(),
                endpoint: format!("https://{}", endpoint),
            }),
            (Err(error), None) => Err(error.into()),
        }
    }
}

/// Where the list of regions to scan comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionSource {
    Fixed(Vec<String>),
    Discover,
}

impl Default for RegionSource {
    fn default() -> Self {
        RegionSource::Fixed(DEFAULT_REGIONS.iter().map(|region| region.to_string()).collect())
    }
}

impl RegionSource {
    pub async fn enumerate<L: ListRegions>(
        &self,
        lister: &L,
    ) -> Result<Vec<AwsRegion>, InstanceSchedulerError> {
        match self {
            RegionSource::Fixed(regions) => {
                Ok(regions.iter().map(|name| AwsRegion::named(name)).collect())
            }
            RegionSource::Discover => {
                let regions = lister.list_regions().await?;
                info!(count = regions.len(), "discovered regions");
                Ok(regions)
            }
        }
    }
}

#[async_trait]
pub trait ListRegions: Send + Sync {
    async fn list_regions(&self) -> Result<Vec<AwsRegion>, InstanceSchedulerError>;
}

pub struct Ec2RegionClient {
    client: Ec2Client,
}

#[async_trait]
impl ListRegions for Ec2RegionClient {
    async fn list_regions(&self) -> Result<Vec<AwsRegion>, InstanceSchedulerError> {
        let result = self
            .client
            .describe_regions(DescribeRegionsRequest::default())
            .await?;

        Ok(result
            .regions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|region| {
                let name = region.region_name?;
                Some(AwsRegion {
                    name,
                    endpoint: region.endpoint,
                })
            })
            .collect())
    }
}

impl Ec2RegionClient {
    pub fn new(home_region: &str) -> Result<Self, InstanceSchedulerError> {
        let region = Region::from_str(home_region)?;
        Ok(Self::new_with_client(Ec2Client::new(region)))
    }

    fn new_with_client(client: Ec2Client) -> Self {
        Ec2RegionClient { client }
    }
}
