use crate::battle::state::BattlerId;
use schema::{StatFamily, StatType};
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification used by the turn orchestrator to decide whether to
/// abort the turn or skip the offending action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller passed a value outside the accepted domain.
    InvalidArgument,
    /// The operation is not defined for the given stat.
    InvalidOperation,
}

/// Main error type for the turn-order core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("stat stage {stage} is outside the range -6..=6")]
    StageOutOfRange { stage: i32 },

    #[error("unknown stat family: {0}")]
    UnknownStatFamily(String),

    #[error("action {action_index} references unknown battler {battler}")]
    UnknownBattler { battler: BattlerId, action_index: usize },

    #[error("battler {battler} is on side {side}, which does not exist")]
    UnknownSide { battler: BattlerId, side: usize },

    #[error("{family} stats cannot be stage-modified")]
    NotStageEligible { family: StatFamily },

    #[error("{stat} cannot be stage-modified")]
    StatNotStageEligible { stat: StatType },
}

impl BattleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BattleError::StageOutOfRange { .. }
            | BattleError::UnknownStatFamily(_)
            | BattleError::UnknownBattler { .. }
            | BattleError::UnknownSide { .. } => ErrorKind::InvalidArgument,
            BattleError::NotStageEligible { .. } | BattleError::StatNotStageEligible { .. } => {
                ErrorKind::InvalidOperation
            }
        }
    }
}

/// Errors raised while loading rules or scenario files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Type alias for Results using BattleError
pub type BattleResult<T> = Result<T, BattleError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
