use crate::error::InstanceSchedulerError;
use crate::region::RegionSource;
use crate::schedule::{Action, ActionPolicy};
use chrono_tz::Tz;
use std::str::FromStr;

const DEFAULT_HOME_REGION: &str = "us-east-1";

/// Settings read once at cold start and shared by every invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub webhook_url: Option<String>,
    pub action_policy: ActionPolicy,
    pub region_source: RegionSource,
    pub home_region: String,
}

impl Config {
    pub fn from_env() -> Result<Self, InstanceSchedulerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InstanceSchedulerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let action_policy = match get("ACTION") {
            Some(action) => ActionPolicy::Fixed(Action::from_str(&action)?),
            None => Self::schedule_policy(&get)?,
        };

        let region_source = match get("REGION_SOURCE").as_deref() {
            None | Some("fixed") => match get("REGIONS") {
                Some(regions) => RegionSource::Fixed(
                    regions
                        .split(',')
                        .map(str::trim)
                        .filter(|region| !region.is_empty())
                        .map(str::to_string)
                        .collect(),
                ),
                None => RegionSource::default(),
            },
            Some("discover") => RegionSource::Discover,
            Some(other) => {
                return Err(InstanceSchedulerError::InvalidConfig {
                    key: "REGION_SOURCE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Config {
            webhook_url: get("SLACK_WEBHOOK_URL"),
            action_policy,
            region_source,
            home_region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_HOME_REGION.to_string()),
        })
    }

    fn schedule_policy<G>(get: &G) -> Result<ActionPolicy, InstanceSchedulerError>
    where
        G: Fn(&str) -> Option<String>,
    {
        let start_hour = get("START_HOUR");
        let stop_hour = get("STOP_HOUR");
        let (start_hour, stop_hour) = match (start_hour, stop_hour) {
            (None, None) => return Ok(ActionPolicy::Fixed(Action::None)),
            (Some(start), Some(stop)) => (
                Self::parse_hour("START_HOUR", &start)?,
                Self::parse_hour("STOP_HOUR", &stop)?,
            ),
            (None, Some(_)) => return Err(InstanceSchedulerError::MissingConfig("START_HOUR")),
            (Some(_), None) => return Err(InstanceSchedulerError::MissingConfig("STOP_HOUR")),
        };
        if start_hour == stop_hour {
            return Err(InstanceSchedulerError::InvalidConfig {
                key: "STOP_HOUR",
                value: stop_hour.to_string(),
            });
        }

        let timezone = match get("TIMEZONE") {
            Some(name) => Tz::from_str(&name).map_err(|_| InstanceSchedulerError::InvalidConfig {
                key: "TIMEZONE",
                value: name.clone(),
            })?,
            None => Tz::UTC,
        };

        Ok(ActionPolicy::Schedule {
            timezone,
            start_hour,
            stop_hour,
        })
    }

    fn parse_hour(key: &'static str, value: &str) -> Result<u32, InstanceSchedulerError> {
        value
            .parse::<u32>()
            .ok()
            .filter(|hour| *hour < 24)
            .ok_or_else(|| InstanceSchedulerError::InvalidConfig {
                key,
                value: value.to_string(),
            })
    }
}
