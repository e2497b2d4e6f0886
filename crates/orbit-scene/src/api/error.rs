use thiserror::Error;

/// Everything that can go wrong while building or driving the scene.
///
/// A missing container is deliberately *not* an error: initialization just
/// returns `Ok(None)` and nothing is constructed.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A config value is out of its valid range.
    #[error("invalid scene config: {0}")]
    Config(String),
    /// The JSON config could not be parsed.
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The rendering backend could not be created or allocate a resource.
    #[error("render backend unavailable: {0}")]
    Backend(String),
    /// Shader compilation or program linking failed. Carries the driver log.
    #[error("shader program failed: {0}")]
    Shader(String),
    /// The host document rejected a call (element creation, listeners, ...).
    #[error("host document call failed: {0}")]
    Dom(String),
}
