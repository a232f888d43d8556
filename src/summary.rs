use crate::inventory::RegionReport;
use crate::schedule::Action;
use std::fmt::Write;

const HEADER: &str = "*EC2 Summary: Region, ID, State & Type*";
pub const TOTAL_LABEL: &str = "Total EC2 Instances (Running & Stopped)";

/// Slack message text plus the counters derived from a run.
#[derive(Debug, PartialEq)]
pub struct Summary {
    pub text: String,
    pub total_instances: usize,
    pub started: Vec<(String, String)>,
    pub stopped: Vec<(String, String)>,
}

impl Summary {
    pub fn build(reports: &[RegionReport], action: Action) -> Self {
        let mut text = String::new();
        let mut total_instances = 0;
        let mut actuated = Vec::new();
        let _ = writeln!(text, "{}", HEADER);

        for report in reports {
            for instance in report.instances() {
                total_instances += 1;
                let _ = writeln!(
                    text,
                    "• Region: `{}` | ID: `{}` | State: `{}` | Type: `{}`",
                    instance.region, instance.instance_id, instance.state, instance.instance_type
                );
            }
            if let Some(error) = report.error() {
                let _ = writeln!(text, "• Region: `{}` - Error: {}", report.region, error);
            }
            actuated.extend(
                report
                    .actuated()
                    .iter()
                    .map(|id| (report.region.clone(), id.clone())),
            );
        }

        let (started, stopped) = match action {
            Action::Start => (actuated, vec![]),
            Action::Stop => (vec![], actuated),
            Action::None => (vec![], vec![]),
        };
        Self::write_actuated(&mut text, "Started instances", &started);
        Self::write_actuated(&mut text, "Stopped instances", &stopped);
        let _ = write!(text, "*{}:* {}", TOTAL_LABEL, total_instances);

        Summary {
            text,
            total_instances,
            started,
            stopped,
        }
    }

    fn write_actuated(text: &mut String, title: &str, instances: &[(String, String)]) {
        if instances.is_empty() {
            return;
        }
        let _ = writeln!(text, "*{}:*", title);
        for (region, id) in instances {
            let _ = writeln!(text, "• `{}` (`{}`)", id, region);
        }
    }
}
