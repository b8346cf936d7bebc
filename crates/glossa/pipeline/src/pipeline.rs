use crate::error::PipelineError;
use crate::generator::Generator;
use glossa_classifier::TermClassifier;
use glossa_config::ConfigStore;
use glossa_gate::{AcceptanceGate, CompletenessFacts};
use glossa_prompt::{standard_modules, PromptContext, PromptOrchestrator};
use glossa_scorer::ValidationScorer;
use glossa_types::{
    ClassificationResult, ComposedArtifact, GateDecision, TermContext, ValidationResult,
};
use std::sync::Arc;
use uuid::Uuid;

/// Everything one run produced, handed to the persistence/UI
/// collaborator: the classification, the composed instruction (for
/// transparency and debugging), the generated text, the scoring, and the
/// gate decision.
#[derive(Clone, Debug)]
pub struct PipelineOutcome {
    pub run_id: Uuid,
    pub classification: ClassificationResult,
    pub artifact: ComposedArtifact,
    pub generated_text: String,
    pub validation: ValidationResult,
    pub decision: GateDecision,
}

/// Coordinates one definition round. The pipeline is stateless between
/// runs; each run takes fresh configuration snapshots from the store, so
/// a concurrent reload never changes the rules mid-flight.
pub struct DefinitionPipeline {
    store: Arc<ConfigStore>,
}

impl DefinitionPipeline {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }

    /// Run the full flow with the standard module set.
    ///
    /// Generation is awaited in place: when the caller drops this future
    /// the generator call is cancelled with it, and scoring never runs.
    pub async fn run(
        &self,
        context: &TermContext,
        generator: &dyn Generator,
        facts: &CompletenessFacts,
    ) -> Result<PipelineOutcome, PipelineError> {
        context.validate()?;

        let classifier_config = self.store.classifier()?;
        let catalog = self.store.catalog()?;
        let run_id = Uuid::new_v4();

        let classification = TermClassifier::classify(context, &classifier_config);
        tracing::info!(
            run_id = %run_id,
            term = %context.term,
            category = %classification.category,
            confidence = classification.confidence,
            "pipeline classified term"
        );

        let prompt_context = PromptContext::new(context.clone(), classification.clone());
        let modules = standard_modules();
        let artifact = PromptOrchestrator::compose(&modules, &prompt_context)?;

        // The only suspension point: the external generation call. An
        // Err aborts the run here — scoring is never invoked for text
        // that was never produced.
        let generated_text = generator.generate(&artifact).await?;

        let validation = ValidationScorer::new(&catalog)
            .with_subject(&context.term)
            .score(&generated_text);

        let gate = AcceptanceGate::new(&catalog.acceptance);
        let decision = gate.decide(&validation, facts);

        tracing::info!(
            run_id = %run_id,
            overall_score = validation.overall_score,
            acceptable = decision.is_acceptable,
            "pipeline run finished"
        );

        Ok(PipelineOutcome {
            run_id,
            classification,
            artifact,
            generated_text,
            validation,
            decision,
        })
    }

    /// Re-score an already generated text against the current catalog
    /// snapshot, without composing or generating again. Used by the
    /// surrounding application for re-validation after manual edits.
    pub fn revalidate(
        &self,
        term: &str,
        text: &str,
        facts: &CompletenessFacts,
    ) -> Result<(ValidationResult, GateDecision), PipelineError> {
        let catalog = self.store.catalog()?;
        let validation = ValidationScorer::new(&catalog)
            .with_subject(term)
            .score(text);
        let decision = AcceptanceGate::new(&catalog.acceptance).decide(&validation, facts);
        Ok((validation, decision))
    }
}
