use std::fmt;

use tracing::debug;

use crate::cli::{Command, Invocation};
use crate::decommission::{self, Decommissioned};
use crate::error::Result;
use crate::gateway::{Ec2Gateway, InstanceFilter};
use crate::provision;

/// What a completed invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { instance_id: String },
    Terminated { instance_ids: Vec<String> },
    NothingMatched { filter: InstanceFilter },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created { instance_id } => {
                write!(f, "Created tagged instance with ID {instance_id}")
            }
            Outcome::Terminated { instance_ids } => {
                write!(f, "Terminated instances with IDs: {}", instance_ids.join(", "))
            }
            Outcome::NothingMatched { filter } => write!(
                f,
                "No instances found with {} in [{}], nothing to terminate",
                filter.name,
                filter.values.join(", ")
            ),
        }
    }
}

/// Route a validated invocation to its handler.
pub async fn dispatch<G>(gateway: &G, invocation: &Invocation) -> Result<Outcome>
where
    G: Ec2Gateway + ?Sized,
{
    debug!(command = ?invocation.command, "Dispatching");

    match invocation.command {
        Command::Create => {
            let instance_id = provision::run(
                gateway,
                &invocation.config_path,
                &invocation.tag,
                invocation.deadline,
            )
            .await?;
            Ok(Outcome::Created { instance_id })
        }
        Command::Delete => {
            match decommission::run(gateway, &invocation.tag, invocation.deadline).await? {
                Decommissioned::Terminated(instance_ids) => Ok(Outcome::Terminated { instance_ids }),
                Decommissioned::NothingMatched(filter) => Ok(Outcome::NothingMatched { filter }),
            }
        }
    }
}
