use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// An action was rejected with a player-facing reason. Recoverable:
    /// the turn is not consumed and the player may choose again.
    #[error("{0}")]
    Impossible(String),

    #[error("Entity not found: {0:?}")]
    EntityNotFound(crate::core::types::EntityId),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl GameError {
    pub fn impossible(reason: impl Into<String>) -> Self {
        Self::Impossible(reason.into())
    }

    pub fn is_impossible(&self) -> bool {
        matches!(self, Self::Impossible(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
