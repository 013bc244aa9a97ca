//! Command-line arguments and their validation.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::error::{Error, Result};
use crate::gateway::{Deadline, Tag};

pub const COMMAND_USAGE: &str = "You must supply a command, create or delete (-c create)";
pub const TAG_USAGE: &str = "You must supply a name and value for the tag (-n NAME -v VALUE)";

#[derive(Parser, Debug, Clone)]
#[command(name = "vmcreate")]
#[command(version, about = "Provision or terminate tagged EC2 instances")]
pub struct Args {
    /// Command to run: create or delete
    #[arg(short = 'c', long, default_value = "")]
    pub command: String,

    /// Name of the tag to attach to (or match against) the instance
    #[arg(short = 'n', long, default_value = "")]
    pub name: String,

    /// Value of the tag; with delete, a comma-separated list of values
    #[arg(short = 'v', long, default_value = "")]
    pub value: String,

    /// Instance configuration file used by create
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, env = "VMCREATE_CONFIG")]
    pub config: PathBuf,

    /// AWS region (falls back to the default provider chain)
    #[arg(short, long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// AWS profile to use
    #[arg(short, long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Timeout in seconds for each AWS call, 0 to wait forever
    #[arg(long, default_value_t = 60, env = "VMCREATE_TIMEOUT")]
    pub timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "VMCREATE_LOG_LEVEL")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Create,
    Delete,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Command::Create),
            "delete" => Ok(Command::Delete),
            other => Err(Error::UnknownCommand(other.to_string())),
        }
    }
}

/// A validated request to run one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub tag: Tag,
    pub config_path: PathBuf,
    pub deadline: Deadline,
}

impl Invocation {
    /// Validate `args`. The command is checked before the tag fields.
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.command.is_empty() {
            return Err(Error::Usage(COMMAND_USAGE));
        }

        if args.name.is_empty() || args.value.is_empty() {
            return Err(Error::Usage(TAG_USAGE));
        }

        Ok(Self {
            command: args.command.parse()?,
            tag: Tag::new(&args.name, &args.value),
            config_path: args.config.clone(),
            deadline: Deadline::from_secs(args.timeout),
        })
    }
}
