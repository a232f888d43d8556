use crate::ec2_instance_client::{Connect, Control, Describe, InstanceState, MachineInstance};
use crate::error::InstanceSchedulerError;
use crate::region::AwsRegion;
use crate::schedule::Action;
use tracing::{info, warn};

#[derive(Debug, PartialEq)]
pub enum RegionOutcome {
    Scanned {
        instances: Vec<MachineInstance>,
        actuated: Vec<String>,
    },
    ScanFailed(InstanceSchedulerError),
    ActuationFailed {
        instances: Vec<MachineInstance>,
        error: InstanceSchedulerError,
    },
}

#[derive(Debug, PartialEq)]
pub struct RegionReport {
    pub region: String,
    pub outcome: RegionOutcome,
}

impl RegionReport {
    pub fn instances(&self) -> &[MachineInstance] {
        match self.outcome {
            RegionOutcome::Scanned { ref instances, .. } => instances,
            RegionOutcome::ActuationFailed { ref instances, .. } => instances,
            RegionOutcome::ScanFailed(_) => &[],
        }
    }

    pub fn actuated(&self) -> &[String] {
        match self.outcome {
            RegionOutcome::Scanned { ref actuated, .. } => actuated,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&InstanceSchedulerError> {
        match self.outcome {
            RegionOutcome::ScanFailed(ref error) => Some(error),
            RegionOutcome::ActuationFailed { ref error, .. } => Some(error),
            RegionOutcome::Scanned { .. } => None,
        }
    }
}

/// Ids eligible for `action`, in scan order.
pub fn select_for_action(action: Action, instances: &[MachineInstance]) -> Vec<String> {
    let wanted = match action {
        Action::Start => InstanceState::Stopped,
        Action::Stop => InstanceState::Running,
        Action::None => return vec![],
    };
    instances
        .iter()
        .filter(|instance| instance.state == wanted)
        .map(|instance| instance.instance_id.clone())
        .collect()
}

pub async fn scan_region<C: Describe + Control>(client: &C, action: Action) -> RegionOutcome {
    let instances: Vec<MachineInstance> = match client.describe_instances().await {
        Ok(instances) => instances
            .into_iter()
            .filter(|instance| instance.state.is_scanned())
            .collect(),
        Err(error) => return RegionOutcome::ScanFailed(error),
    };

    let selected = select_for_action(action, &instances);
    if selected.is_empty() {
        return RegionOutcome::Scanned {
            instances,
            actuated: selected,
        };
    }

    let result = match action {
        Action::Start => client.start_instances(&selected).await,
        Action::Stop => client.stop_instances(&selected).await,
        Action::None => Ok(()),
    };
    match result {
        Ok(()) => RegionOutcome::Scanned {
            instances,
            actuated: selected,
        },
        Err(error) => RegionOutcome::ActuationFailed { instances, error },
    }
}

/// Scans the regions one after another. Failures stay inside their region's report.
pub async fn scan_regions<F: Connect>(
    connector: &F,
    regions: &[AwsRegion],
    action: Action,
) -> Vec<RegionReport> {
    let mut reports = Vec::with_capacity(regions.len());
    for region in regions {
        let outcome = match connector.connect(region) {
            Ok(client) => scan_region(&client, action).await,
            Err(error) => RegionOutcome::ScanFailed(error),
        };
        let report = RegionReport {
            region: region.name.clone(),
            outcome,
        };
        match report.error() {
            Some(error) => warn!(region = %report.region, %error, "region failed"),
            None => info!(
                region = %report.region,
                instances = report.instances().len(),
                actuated = report.actuated().len(),
                %action,
                "region scanned"
            ),
        }
        reports.push(report);
    }
    reports
}
