//! ECS: task definition registration.

use serde::Deserialize;

use waggle_core::{
    types::{Revision, TaskName},
    OrchestrationClient, OrchestrationError, TaskDefinition,
};

use crate::cli::AwsCli;

const REGISTER: &str = "RegisterTaskDefinition";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisteredTaskDefinition {
    revision: u32,
    #[serde(default)]
    task_definition_arn: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterTaskDefinitionResponse {
    task_definition: RegisteredTaskDefinition,
}

impl OrchestrationClient for AwsCli {
    fn register_task_definition(
        &self,
        family: &TaskName,
        network_mode: &str,
        definition: &TaskDefinition,
    ) -> Result<Revision, OrchestrationError> {
        let containers = definition.to_container_definitions().to_string();
        let response: RegisterTaskDefinitionResponse = self
            .invoke(
                "ecs",
                "register-task-definition",
                &[
                    "--family",
                    family.as_str(),
                    "--network-mode",
                    network_mode,
                    "--container-definitions",
                    &containers,
                ],
            )
            .map_err(|e| e.into_orchestration_error(REGISTER))?;

        let registered = response.task_definition;
        if let Some(arn) = registered.task_definition_arn.as_deref() {
            tracing::debug!(%family, arn, "task definition registered");
        }
        Ok(Revision(registered.revision))
    }
}
