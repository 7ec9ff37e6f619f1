//! Battle rule configuration.
//!
//! Rules are plain data loaded from RON (see `data/battle_rules.ron`) and
//! handed to the speed chain and resolver when they are built.

use crate::battle::turn_order::TieBreakPolicy;
use crate::errors::{ConfigError, ConfigResult};
use schema::AbilityId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleRules {
    /// Abilities whose holders keep full speed while paralysed.
    pub paralysis_ignoring_abilities: Vec<AbilityId>,
    /// How actions with equal priority and equal effective speed are ordered.
    pub tie_break: TieBreakPolicy,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            paralysis_ignoring_abilities: vec![AbilityId::new("quickfeet")],
            tie_break: TieBreakPolicy::EnqueueOrder,
        }
    }
}

impl BattleRules {
    pub fn from_ron_str(content: &str) -> ConfigResult<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_ron_str(&content)?;
        tracing::debug!(
            "Loaded battle rules from {}: {} paralysis-ignoring abilities, tie break {:?}",
            path.display(),
            rules.paralysis_ignoring_abilities.len(),
            rules.tie_break
        );
        Ok(rules)
    }

    /// Load `path`, falling back to [`BattleRules::default`] only when the
    /// file does not exist. Unreadable or malformed files are still errors.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::Io { ref source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("No rules file at {}, using default rules", path.display());
                Ok(Self::default())
            }
            result => result,
        }
    }
}
