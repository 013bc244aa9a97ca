//! `delete`: terminate every instance whose tag matches one of the values.

use tracing::{info, warn};

use crate::error::Result;
use crate::gateway::{Deadline, Ec2Gateway, InstanceFilter, Operation, Tag, TerminateRequest};

/// Filter on `tag:<key>` accepting each comma-separated part of the value.
pub fn tag_filter(tag: &Tag) -> InstanceFilter {
    InstanceFilter {
        name: format!("tag:{}", tag.key),
        values: tag.value.split(',').map(str::to_string).collect(),
    }
}

/// Result of a decommission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decommissioned {
    Terminated(Vec<String>),
    NothingMatched(InstanceFilter),
}

/// Look up instances matching `tag` and terminate them in a single request.
///
/// No terminate request is sent when the lookup matched nothing.
pub async fn run<G>(gateway: &G, tag: &Tag, deadline: Deadline) -> Result<Decommissioned>
where
    G: Ec2Gateway + ?Sized,
{
    let filter = tag_filter(tag);

    info!(name = %filter.name, values = ?filter.values, "Looking up instances");
    let instance_ids = deadline
        .run(Operation::DescribeInstances, gateway.describe_instances(&filter))
        .await?;

    if instance_ids.is_empty() {
        warn!(name = %filter.name, "No instances matched");
        return Ok(Decommissioned::NothingMatched(filter));
    }

    info!(?instance_ids, "Terminating instances");
    let request = TerminateRequest {
        instance_ids,
        dry_run: false,
    };
    let terminated = deadline
        .run(Operation::TerminateInstances, gateway.terminate_instances(&request))
        .await?;

    Ok(Decommissioned::Terminated(terminated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::gateway::testing::{Call, RecordingGateway};

    #[test]
    fn test_filter_splits_values() {
        let filter = tag_filter(&Tag::new("env", "a,b,c"));
        assert_eq!(filter.name, "tag:env");
        assert_eq!(filter.values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filter_single_value() {
        let filter = tag_filter(&Tag::new("Name", "web-1"));
        assert_eq!(filter.values, vec!["web-1"]);
    }

    #[tokio::test]
    async fn test_lookup_uses_split_filter() {
        let gateway = RecordingGateway::new().matching(&["i-1"]);

        run(&gateway, &Tag::new("env", "a,b,c"), Deadline::unbounded())
            .await
            .unwrap();

        assert_eq!(
            gateway.calls()[0],
            Call::DescribeInstances(InstanceFilter {
                name: "tag:env".to_string(),
                values: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            })
        );
    }

    #[tokio::test]
    async fn test_terminates_all_matches_in_one_request() {
        let gateway = RecordingGateway::new().matching(&["i-1", "i-2", "i-3"]);

        let outcome = run(&gateway, &Tag::new("env", "dev"), Deadline::unbounded())
            .await
            .unwrap();

        assert_eq!(gateway.count(Operation::TerminateInstances), 1);
        assert_eq!(
            gateway.calls()[1],
            Call::TerminateInstances(TerminateRequest {
                instance_ids: vec!["i-1".to_string(), "i-2".to_string(), "i-3".to_string()],
                dry_run: false,
            })
        );
        assert_eq!(
            outcome,
            Decommissioned::Terminated(vec![
                "i-1".to_string(),
                "i-2".to_string(),
                "i-3".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_no_matches_skips_terminate() {
        let gateway = RecordingGateway::new();

        let outcome = run(&gateway, &Tag::new("env", "gone"), Deadline::unbounded())
            .await
            .unwrap();

        assert_eq!(outcome, Decommissioned::NothingMatched(tag_filter(&Tag::new("env", "gone"))));
        assert_eq!(gateway.count(Operation::DescribeInstances), 1);
        assert_eq!(gateway.count(Operation::TerminateInstances), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_skips_terminate() {
        let gateway = RecordingGateway::new()
            .matching(&["i-1"])
            .failing(Operation::DescribeInstances);

        let err = run(&gateway, &Tag::new("env", "dev"), Deadline::unbounded())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Aws { operation: Operation::DescribeInstances, .. }));
        assert_eq!(gateway.count(Operation::TerminateInstances), 0);
    }

    #[tokio::test]
    async fn test_terminate_failure_is_reported() {
        let gateway = RecordingGateway::new()
            .matching(&["i-1"])
            .failing(Operation::TerminateInstances);

        let err = run(&gateway, &Tag::new("env", "dev"), Deadline::unbounded())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Aws { operation: Operation::TerminateInstances, .. }));
    }
}
