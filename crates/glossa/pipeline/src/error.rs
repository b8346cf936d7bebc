use crate::generator::GenerationError;
use glossa_config::ConfigError;
use glossa_prompt::ComposeError;
use glossa_types::ContextError;

/// Errors from an end-to-end pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid term context: {0}")]
    Context(#[from] ContextError),
    #[error("configuration unavailable: {0}")]
    Config(#[from] ConfigError),
    #[error("prompt composition failed: {0}")]
    Compose(#[from] ComposeError),
    /// Generation failed or was abandoned; scoring was not invoked.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}
