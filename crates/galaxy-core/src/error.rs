use thiserror::Error;

/// Failures while turning a JSON payload into a [`crate::SceneConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scene payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scene payload has no `data` record")]
    MissingData,
}
