pub mod app;
pub mod aws;
pub mod cli;
pub mod config;
pub mod decommission;
pub mod ec2;
pub mod error;
pub mod gateway;
pub mod provision;
