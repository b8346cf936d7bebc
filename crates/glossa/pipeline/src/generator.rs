use async_trait::async_trait;
use glossa_types::ComposedArtifact;

/// Why the collaborator produced no text.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generator failed: {0}")]
    Failed(String),
    #[error("generation was cancelled by the caller")]
    Cancelled,
}

/// The external generation collaborator, invoked between composition and
/// scoring. The pipeline consumes its output and nothing else: it does
/// not retry, rate-limit, or time out the call — that is the
/// collaborator's concern.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, artifact: &ComposedArtifact) -> Result<String, GenerationError>;
}

/// Fixed-output generator for tests and dry runs.
pub struct StaticGenerator {
    text: String,
}

impl StaticGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl Generator for StaticGenerator {
    async fn generate(&self, _artifact: &ComposedArtifact) -> Result<String, GenerationError> {
        Ok(self.text.clone())
    }
}

/// Always-failing generator for tests.
pub struct FailingGenerator;

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _artifact: &ComposedArtifact) -> Result<String, GenerationError> {
        Err(GenerationError::Failed("backend unavailable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_types::ComposedArtifact;

    #[tokio::test]
    async fn static_generator_echoes_its_text() {
        let artifact = ComposedArtifact::from_sections(Vec::new());
        let text = StaticGenerator::new("een toestemming")
            .generate(&artifact)
            .await
            .unwrap();
        assert_eq!(text, "een toestemming");
    }

    #[tokio::test]
    async fn failing_generator_reports_cause() {
        let artifact = ComposedArtifact::from_sections(Vec::new());
        let err = FailingGenerator.generate(&artifact).await.unwrap_err();
        assert!(err.to_string().contains("backend unavailable"));
    }
}
