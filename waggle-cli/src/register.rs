//! `register-task <dirname>...`: the whole batch, from settings to summary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use waggle_aws::AwsCli;
use waggle_core::AwsSettings;
use waggle_docker::DockerCli;
use waggle_pipeline::{
    self as pipeline, Backends, BatchError, BatchParams, DEFAULT_NAMESPACE, DEFAULT_TAG,
};

use crate::report;

/// Exit code when the batch is refused because of bad directory arguments.
const EXIT_REJECTED: u8 = 2;

/// Arguments for a registration batch.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Docker image directories to register.
    #[arg(value_name = "DIRNAME", required = true)]
    pub dirnames: Vec<PathBuf>,

    /// Version tag to push the images with.
    #[arg(long, short = 't', default_value = DEFAULT_TAG)]
    pub tag: String,

    /// Namespace used for ECR repositories and CloudWatch log groups.
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Emit the batch summary as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Docker-compatible CLI used to build, tag and push images.
    #[arg(long, value_name = "PROGRAM", env = "WAGGLE_DOCKER", default_value = "docker")]
    pub docker: PathBuf,

    /// AWS CLI used for ECR and ECS calls.
    #[arg(long, value_name = "PROGRAM", env = "WAGGLE_AWS", default_value = "aws")]
    pub aws: PathBuf,
}

impl RegisterArgs {
    pub fn run(self) -> Result<ExitCode> {
        let settings = AwsSettings::load()?;
        tracing::debug!(?settings, "resolved AWS settings");

        let params = BatchParams {
            namespace: self.namespace,
            tag: self.tag,
            region: settings.region.clone(),
        };
        let docker = DockerCli::new(self.docker);
        let aws = AwsCli::new(self.aws, settings);
        let backends = Backends {
            builder: &docker,
            publisher: &docker,
            registry: &aws,
            orchestration: &aws,
        };

        match pipeline::register(&self.dirnames, &params, &backends) {
            Ok(batch) => {
                if self.json {
                    report::print_json(&batch)?;
                } else {
                    report::print_failures(&batch);
                    report::print_summary(&batch);
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(BatchError::Rejected(rejection)) => {
                report::print_rejection(&rejection);
                Ok(ExitCode::from(EXIT_REJECTED))
            }
            Err(err) => Err(err.into()),
        }
    }
}
