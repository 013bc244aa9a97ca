//! The boundary between the command handlers and the EC2 API.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Remote operations issued through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RunInstances,
    CreateTags,
    DescribeInstances,
    TerminateInstances,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::RunInstances => "RunInstances",
            Operation::CreateTags => "CreateTags",
            Operation::DescribeInstances => "DescribeInstances",
            Operation::TerminateInstances => "TerminateInstances",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key/value label attached to an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub image_id: String,
    pub instance_type: String,
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    pub resource_ids: Vec<String>,
    pub tags: Vec<Tag>,
}

/// A describe filter such as `tag:env` = `["dev", "stg"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceFilter {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminateRequest {
    pub instance_ids: Vec<String>,
    pub dry_run: bool,
}

/// Remote EC2 operations used by the handlers.
///
/// Every method maps to exactly one API call. Implementations return the
/// instance ids the provider reported, in response order.
#[async_trait]
pub trait Ec2Gateway: Send + Sync {
    async fn run_instances(&self, request: &LaunchRequest) -> Result<Vec<String>>;

    async fn create_tags(&self, request: &TagRequest) -> Result<()>;

    async fn describe_instances(&self, filter: &InstanceFilter) -> Result<Vec<String>>;

    async fn terminate_instances(&self, request: &TerminateRequest) -> Result<Vec<String>>;
}

/// Upper bound on how long a single gateway call may take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    timeout: Option<Duration>,
}

impl Deadline {
    pub const fn unbounded() -> Self {
        Self { timeout: None }
    }

    pub const fn after(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// `0` disables the deadline.
    pub fn from_secs(secs: u64) -> Self {
        match secs {
            0 => Self::unbounded(),
            n => Self::after(Duration::from_secs(n)),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Await `call`, failing with [`Error::Timeout`] once the deadline passes.
    pub async fn run<T, F>(self, operation: Operation, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.timeout {
            None => call.await,
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| Error::Timeout {
                    operation,
                    timeout: limit,
                })?,
        }
    }
}
