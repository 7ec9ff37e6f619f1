use crate::battle::state::{Action, BattleContext};
use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A battle snapshot plus the actions queued for its current turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnScenario {
    pub context: BattleContext,
    pub actions: Vec<Action>,
}

impl TurnScenario {
    pub fn from_ron_str(content: &str) -> ConfigResult<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }
}
