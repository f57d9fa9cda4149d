use thiserror::Error;

/// Errors surfaced while setting up a game session.
///
/// Nothing in the per-tick hot path is fallible; these only come out of
/// construction, resizing and configuration loading.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no drawing surface available (width {width}, height {height})")]
    MissingSurface { width: f32, height: f32 },

    #[error("invalid config value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
