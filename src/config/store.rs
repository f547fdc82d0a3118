//! Project store selection and seeding

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::ProjectName;

/// Which adapter backs the project repository.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map; contents vanish on restart.
    #[default]
    Memory,
    Postgres,
}

/// Project store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Projects created at startup if missing, comma-separated.
    #[serde(default = "default_seed_projects")]
    pub seed_projects: String,
}

impl StoreConfig {
    /// Parsed seed project names.
    pub fn seed_project_names(&self) -> Result<Vec<ProjectName>, ValidationError> {
        self.seed_projects
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                ProjectName::new(name).map_err(|_| ValidationError::InvalidProjectName(name.into()))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.seed_project_names().map(|_| ())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            seed_projects: default_seed_projects(),
        }
    }
}

fn default_seed_projects() -> String {
    "apitest".to_string()
}
