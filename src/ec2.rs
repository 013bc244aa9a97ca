use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::operation::describe_instances::DescribeInstancesOutput;
use aws_sdk_ec2::types::{Filter, InstanceType, Tag as Ec2Tag};
use aws_sdk_ec2::Client;
use tracing::debug;

use crate::error::{Error, Result};
use crate::gateway::{
    Ec2Gateway, InstanceFilter, LaunchRequest, Operation, TagRequest, TerminateRequest,
};

/// [`Ec2Gateway`] backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct Ec2Client {
    client: Client,
}

impl Ec2Client {
    pub fn new(config: &aws_types::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

fn sdk_error<E>(operation: Operation, err: E) -> Error
where
    E: std::error::Error,
{
    Error::aws(operation, DisplayErrorContext(err))
}

fn to_sdk_filter(filter: &InstanceFilter) -> Filter {
    Filter::builder()
        .name(&filter.name)
        .set_values(Some(filter.values.clone()))
        .build()
}

fn instance_ids(resp: &DescribeInstancesOutput) -> Vec<String> {
    resp.reservations()
        .iter()
        .flat_map(|res| res.instances())
        .filter_map(|inst| inst.instance_id().map(|id| id.to_string()))
        .collect()
}

#[async_trait]
impl Ec2Gateway for Ec2Client {
    async fn run_instances(&self, request: &LaunchRequest) -> Result<Vec<String>> {
        debug!(
            image_id = %request.image_id,
            instance_type = %request.instance_type,
            count = request.count,
            "RunInstances"
        );

        let resp = self
            .client
            .run_instances()
            .image_id(&request.image_id)
            .instance_type(InstanceType::from(request.instance_type.as_str()))
            .min_count(request.count)
            .max_count(request.count)
            .send()
            .await
            .map_err(|e| sdk_error(Operation::RunInstances, e))?;

        Ok(resp
            .instances()
            .iter()
            .filter_map(|inst| inst.instance_id().map(|id| id.to_string()))
            .collect())
    }

    async fn create_tags(&self, request: &TagRequest) -> Result<()> {
        debug!(resources = ?request.resource_ids, "CreateTags");

        let tags = request
            .tags
            .iter()
            .map(|tag| Ec2Tag::builder().key(&tag.key).value(&tag.value).build())
            .collect();

        self.client
            .create_tags()
            .set_resources(Some(request.resource_ids.clone()))
            .set_tags(Some(tags))
            .send()
            .await
            .map_err(|e| sdk_error(Operation::CreateTags, e))?;

        Ok(())
    }

    async fn describe_instances(&self, filter: &InstanceFilter) -> Result<Vec<String>> {
        debug!(name = %filter.name, values = ?filter.values, "DescribeInstances");

        let resp = self
            .client
            .describe_instances()
            .filters(to_sdk_filter(filter))
            .send()
            .await
            .map_err(|e| sdk_error(Operation::DescribeInstances, e))?;

        Ok(instance_ids(&resp))
    }

    async fn terminate_instances(&self, request: &TerminateRequest) -> Result<Vec<String>> {
        debug!(instance_ids = ?request.instance_ids, dry_run = request.dry_run, "TerminateInstances");

        let resp = self
            .client
            .terminate_instances()
            .set_instance_ids(Some(request.instance_ids.clone()))
            .dry_run(request.dry_run)
            .send()
            .await
            .map_err(|e| sdk_error(Operation::TerminateInstances, e))?;

        Ok(resp
            .terminating_instances()
            .iter()
            .filter_map(|change| change.instance_id().map(|id| id.to_string()))
            .collect())
    }
}
