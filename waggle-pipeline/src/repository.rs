//! Repository resolution: describe, and create only when the registry says
//! the repository does not exist.

use waggle_core::{
    types::{RepositoryName, RepositoryUri},
    RegistryClient, RegistryError,
};

/// Look up `name`, creating it on [`RegistryError::RepositoryNotFound`].
///
/// Every other lookup failure is returned untouched; a permissions or
/// throttling error must never turn into a create call.
pub fn resolve_repository(
    registry: &dyn RegistryClient,
    name: &RepositoryName,
) -> Result<RepositoryUri, RegistryError> {
    match registry.describe_repository(name) {
        Ok(uri) => Ok(uri),
        Err(err) if err.is_not_found() => {
            tracing::info!(repository = %name, "repository not found; creating it");
            registry.create_repository(name)
        }
        Err(err) => Err(err),
    }
}
