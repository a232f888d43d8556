use std::error::Error;

use rusoto_core::region::ParseRegionError;
use rusoto_core::RusotoError;
use rusoto_ec2::{
    DescribeInstancesError, DescribeRegionsError, StartInstancesError, StopInstancesError,
};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum InstanceSchedulerError {
    MissingConfig(&'static str),
    InvalidConfig { key: &'static str, value: String },
    InvalidRegion(ParseRegionError),
    DescribeRegionsError(RusotoError<DescribeRegionsError>),
    DescribeInstancesError(RusotoError<DescribeInstancesError>),
    StartInstancesError(RusotoError<StartInstancesError>),
    StopInstancesError(RusotoError<StopInstancesError>),
    WebhookRequest(String),
    WebhookStatus(u16),
}

impl Display for InstanceSchedulerError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            InstanceSchedulerError::MissingConfig(key) => {
                write!(f, "Missing required configuration: {}", key)
            }
            InstanceSchedulerError::InvalidConfig { key, ref value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
            InstanceSchedulerError::InvalidRegion(ref error) => Display::fmt(error, f),
            InstanceSchedulerError::DescribeRegionsError(ref error) => Display::fmt(error, f),
            InstanceSchedulerError::DescribeInstancesError(ref error) => Display::fmt(error, f),
            InstanceSchedulerError::StartInstancesError(ref error) => Display::fmt(error, f),
            InstanceSchedulerError::StopInstancesError(ref error) => Display::fmt(error, f),
            InstanceSchedulerError::WebhookRequest(ref message) => {
                write!(f, "Failed to post to webhook: {}", message)
            }
            InstanceSchedulerError::WebhookStatus(status) => {
                write!(f, "Webhook responded with status {}", status)
            }
        }
    }
}

impl Error for InstanceSchedulerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            InstanceSchedulerError::InvalidRegion(ref error) => Some(error),
            InstanceSchedulerError::DescribeRegionsError(ref error) => Some(error),
            InstanceSchedulerError::DescribeInstancesError(ref error) => Some(error),
            InstanceSchedulerError::StartInstancesError(ref error) => Some(error),
            InstanceSchedulerError::StopInstancesError(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<ParseRegionError> for InstanceSchedulerError {
    fn from(e: ParseRegionError) -> InstanceSchedulerError {
        InstanceSchedulerError::InvalidRegion(e)
    }
}

impl From<RusotoError<DescribeRegionsError>> for InstanceSchedulerError {
    fn from(e: RusotoError<DescribeRegionsError>) -> InstanceSchedulerError {
        InstanceSchedulerError::DescribeRegionsError(e)
    }
}

impl From<RusotoError<DescribeInstancesError>> for InstanceSchedulerError {
    fn from(e: RusotoError<DescribeInstancesError>) -> InstanceSchedulerError {
        InstanceSchedulerError::DescribeInstancesError(e)
    }
}

impl From<RusotoError<StartInstancesError>> for InstanceSchedulerError {
    fn from(e: RusotoError<StartInstancesError>) -> InstanceSchedulerError {
        InstanceSchedulerError::StartInstancesError(e)
    }
}

impl From<RusotoError<StopInstancesError>> for InstanceSchedulerError {
    fn from(e: RusotoError<StopInstancesError>) -> InstanceSchedulerError {
        InstanceSchedulerError::StopInstancesError(e)
    }
}

impl From<reqwest::Error> for InstanceSchedulerError {
    fn from(e: reqwest::Error) -> InstanceSchedulerError {
        InstanceSchedulerError::WebhookRequest(e.to_string())
    }
}
