//! ECR: repository lookup/creation and registry login tokens.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use waggle_core::{
    types::{RegistryLogin, RepositoryName, RepositoryUri},
    RegistryClient, RegistryError,
};

use crate::cli::AwsCli;

const DESCRIBE: &str = "DescribeRepositories";
const CREATE: &str = "CreateRepository";
const AUTHORIZE: &str = "GetAuthorizationToken";

/// API error code for a repository that does not exist.
pub(crate) const REPOSITORY_NOT_FOUND: &str = "RepositoryNotFoundException";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Repository {
    repository_uri: String,
}

#[derive(Debug, Deserialize)]
struct DescribeRepositoriesResponse {
    #[serde(default)]
    repositories: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct CreateRepositoryResponse {
    repository: Repository,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizationData {
    authorization_token: String,
    proxy_endpoint: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizationTokenResponse {
    #[serde(default)]
    authorization_data: Vec<AuthorizationData>,
}

impl RegistryClient for AwsCli {
    fn describe_repository(&self, name: &RepositoryName) -> Result<RepositoryUri, RegistryError> {
        let response: DescribeRepositoriesResponse = match self.invoke(
            "ecr",
            "describe-repositories",
            &["--repository-names", name.as_str()],
        ) {
            Ok(response) => response,
            Err(err) if err.code() == Some(REPOSITORY_NOT_FOUND) => {
                return Err(RegistryError::RepositoryNotFound(name.clone()))
            }
            Err(err) => return Err(err.into_registry_error(DESCRIBE)),
        };

        response
            .repositories
            .into_iter()
            .next()
            .map(|r| RepositoryUri::from(r.repository_uri))
            .ok_or_else(|| RegistryError::Response {
                operation: DESCRIBE,
                detail: format!("no repository listed for {name}"),
            })
    }

    fn create_repository(&self, name: &RepositoryName) -> Result<RepositoryUri, RegistryError> {
        let response: CreateRepositoryResponse = self
            .invoke(
                "ecr",
                "create-repository",
                &["--repository-name", name.as_str()],
            )
            .map_err(|e| e.into_registry_error(CREATE))?;
        Ok(RepositoryUri::from(response.repository.repository_uri))
    }

    fn authorization(&self) -> Result<RegistryLogin, RegistryError> {
        let response: AuthorizationTokenResponse = self
            .invoke("ecr", "get-authorization-token", &[])
            .map_err(|e| e.into_registry_error(AUTHORIZE))?;

        let data = response
            .authorization_data
            .into_iter()
            .next()
            .ok_or_else(|| RegistryError::Response {
                operation: AUTHORIZE,
                detail: "no authorization data returned".to_string(),
            })?;
        decode_token(&data.authorization_token, data.proxy_endpoint)
    }
}

/// ECR tokens are base64 of `user:password`.
fn decode_token(token: &str, endpoint: String) -> Result<RegistryLogin, RegistryError> {
    let malformed = |detail: String| RegistryError::Response {
        operation: AUTHORIZE,
        detail,
    };

    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|e| malformed(format!("authorization token is not base64: {e}")))?;
    let decoded = String::from_utf8(bytes)
        .map_err(|_| malformed("authorization token is not UTF-8".to_string()))?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| malformed("authorization token has no ':' separator".to_string()))?;

    Ok(RegistryLogin {
        endpoint,
        username: username.to_string(),
        password: password.to_string(),
    })
}
