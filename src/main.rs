use clap::Parser;
use tracing::debug;

use vmcreate::app;
use vmcreate::aws::configure_aws;
use vmcreate::cli::{Args, Invocation};
use vmcreate::ec2::Ec2Client;
use vmcreate::error::Error;

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}

fn exit_with(err: &Error) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(err.exit_code())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    println!("Provisioning/De-provisioning EC2 in progress");

    let invocation = match Invocation::from_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => exit_with(&e),
    };

    let sdk_config = configure_aws(args.region.clone(), args.profile.clone()).await;
    debug!(region = ?sdk_config.region(), "Loaded AWS configuration");
    let gateway = Ec2Client::new(&sdk_config);

    match app::dispatch(&gateway, &invocation).await {
        Ok(outcome) => println!("{}", outcome),
        Err(e) => exit_with(&e),
    }
}
