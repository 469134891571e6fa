use std::path::PathBuf;

/// Caller-contract violations reported by the engine facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("column {column} is full")]
    IllegalMove { column: usize },

    #[error("column {0} is off the board (expected 0..=6)")]
    InvalidColumn(usize),

    #[error("position ({column}, {row}) is off the board")]
    InvalidPosition { column: usize, row: usize },

    #[error("difficulty level {0} is not supported (expected 1, 2 or 3)")]
    InvalidDifficulty(u8),

    #[error("the game is already over")]
    TerminalState,

    #[error("there is no move to take back")]
    NothingToUndo,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
