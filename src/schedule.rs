use crate::error::InstanceSchedulerError;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Power-state change applied to the scanned instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    None,
}

impl FromStr for Action {
    type Err = InstanceSchedulerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            "" | "none" => Ok(Action::None),
            _ => Err(InstanceSchedulerError::InvalidConfig {
                key: "ACTION",
                value: value.to_string(),
            }),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Action::Start => write!(f, "start"),
            Action::Stop => write!(f, "stop"),
            Action::None => write!(f, "none"),
        }
    }
}

/// How the action for an invocation is chosen.
///
/// `Schedule` compares the current hour in `timezone` against the configured
/// thresholds. Any other hour resolves to `Action::None`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPolicy {
    Fixed(Action),
    Schedule {
        timezone: Tz,
        start_hour: u32,
        stop_hour: u32,
    },
}

impl ActionPolicy {
    pub fn resolve<K: Clock>(&self, clock: &K) -> Action {
        match *self {
            ActionPolicy::Fixed(action) => action,
            ActionPolicy::Schedule {
                timezone,
                start_hour,
                stop_hour,
            } => {
                let hour = clock.now().with_timezone(&timezone).hour();
                if hour == start_hour {
                    Action::Start
                } else if hour == stop_hour {
                    Action::Stop
                } else {
                    Action::None
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
