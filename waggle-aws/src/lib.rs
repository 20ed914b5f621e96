//! # waggle-aws
//!
//! ECR and ECS access through the `aws` command line tool.
//!
//! [`AwsCli`] implements [`waggle_core::RegistryClient`] (ECR repositories and
//! login tokens) and [`waggle_core::OrchestrationClient`] (ECS task
//! definitions). Credentials and region from [`waggle_core::AwsSettings`] are
//! handed to every child process; nothing is read from the ambient AWS
//! profile configuration beyond what the tool itself does.

pub mod cli;
mod ecr;
mod ecs;
pub mod error;

pub use cli::AwsCli;
pub use error::AwsCliError;
