use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    /// Network failure or a non-success HTTP status
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Server answered with a status other than "ok"
    #[error("Game status: {0}")]
    GameStatus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generator error: {0}")]
    Generator(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl BotError {
    /// Whether retrying the same request could plausibly succeed.
    ///
    /// A non-"ok" game status means the game ended or the token is bad,
    /// so it is never transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, BotError::Transport(_) | BotError::Protocol(_))
    }
}

/// Fail with [`BotError::GameStatus`] unless the server reported "ok"
pub fn ensure_ok(status: &str) -> Result<()> {
    if status == "ok" {
        Ok(())
    } else {
        Err(BotError::GameStatus(status.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
