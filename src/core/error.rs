use thiserror::Error;

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Damage cannot be negative (got {0})")]
    NegativeDamage(i32),

    #[error("Damage range of {name} is empty: {min}..={max}")]
    EmptyDamageRange { name: String, min: i32, max: i32 },

    #[error("Decision input closed before a valid choice was made")]
    InputClosed,

    #[error("Scripted decisions exhausted after {0} actions")]
    DecisionsExhausted(usize),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Battle already finished: {0:?}")]
    BattleFinished(crate::battle::BattleOutcome),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl BattleError {
    /// Programming errors that must halt the battle rather than be reported as game events
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            BattleError::NegativeDamage(_) | BattleError::EmptyDamageRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;
