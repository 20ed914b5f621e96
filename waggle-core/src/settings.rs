//! AWS settings resolved once at startup.
//!
//! Values come from the process environment, falling back to a `.env` file in
//! the working directory. The `.env` file never overrides a variable that is
//! already set, and is never written into the process environment: the
//! resolved [`AwsSettings`] is passed explicitly to whoever needs it.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::ConfigError;

pub const REGION_VAR: &str = "AWS_REGION";
pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Name of the optional dotenv file, relative to the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Region and credentials shared by every task of a batch.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsSettings {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSettings")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

impl AwsSettings {
    /// Resolve every variable through `lookup`, reporting the first one missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var: &'static str| lookup(var).ok_or(ConfigError::MissingVar(var));
        Ok(Self {
            region: require(REGION_VAR)?,
            access_key_id: require(ACCESS_KEY_ID_VAR)?,
            secret_access_key: require(SECRET_ACCESS_KEY_VAR)?,
        })
    }

    /// Resolve from the process environment, seeded by `<dir>/.env`.
    pub fn load_at(dir: &Path) -> Result<Self, ConfigError> {
        let dotenv = read_dotenv(&dir.join(DOTENV_FILE))?;
        Self::from_lookup(|var| {
            std::env::var(var)
                .ok()
                .or_else(|| dotenv.get(var).cloned())
        })
    }

    /// [`AwsSettings::load_at`] for the current working directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_at(Path::new("."))
    }
}

/// Parse a dotenv file into a map. A missing file yields an empty map.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let dotenv_err = |source| ConfigError::DotEnv {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(dotenv_err(e)),
    };

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(dotenv_err)?;
        // First definition wins, mirroring "already set is never overridden".
        vars.entry(key).or_insert(value);
    }
    tracing::debug!(path = %path.display(), count = vars.len(), "loaded dotenv file");
    Ok(vars)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
