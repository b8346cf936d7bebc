/// Errors from prompt composition. Both graph errors are fatal for the
/// composition request and name the offending modules.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("module {module:?} depends on {dependency:?}, which is not in the module set")]
    MissingDependency { module: String, dependency: String },
    #[error("dependency cycle: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
    #[error("duplicate module id {0:?}")]
    DuplicateModule(String),
}
