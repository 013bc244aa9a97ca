//! `create`: launch one instance and tag it.

use std::path::Path;

use tracing::info;

use crate::config::InstanceConfig;
use crate::error::{Error, Result};
use crate::gateway::{Deadline, Ec2Gateway, LaunchRequest, Operation, Tag, TagRequest};

/// Instances launched per `create`.
pub const LAUNCH_COUNT: i32 = 1;

/// Load the launch config from `config_path`, then launch and tag.
pub async fn run<G>(gateway: &G, config_path: &Path, tag: &Tag, deadline: Deadline) -> Result<String>
where
    G: Ec2Gateway + ?Sized,
{
    let config = InstanceConfig::load(config_path)?;
    launch_tagged_instance(gateway, &config, tag, deadline).await
}

/// Launch a single instance from `config` and attach `tag` to it.
///
/// Tagging is only attempted once the launch succeeded. A failed tag call
/// leaves the instance running untagged.
pub async fn launch_tagged_instance<G>(
    gateway: &G,
    config: &InstanceConfig,
    tag: &Tag,
    deadline: Deadline,
) -> Result<String>
where
    G: Ec2Gateway + ?Sized,
{
    let request = LaunchRequest {
        image_id: config.image_id.clone(),
        instance_type: config.instance_type.clone(),
        count: LAUNCH_COUNT,
    };

    info!(
        image_id = %request.image_id,
        instance_type = %request.instance_type,
        "Launching instance"
    );
    let launched = deadline
        .run(Operation::RunInstances, gateway.run_instances(&request))
        .await?;

    let instance_id = launched
        .into_iter()
        .next()
        .ok_or(Error::MissingInstanceId(Operation::RunInstances))?;

    info!(%instance_id, key = %tag.key, value = %tag.value, "Tagging instance");
    let tag_request = TagRequest {
        resource_ids: vec![instance_id.clone()],
        tags: vec![tag.clone()],
    };
    deadline
        .run(Operation::CreateTags, gateway.create_tags(&tag_request))
        .await?;

    Ok(instance_id)
}
