use glossa_types::GateState;

/// Errors from gate transitions. A failed override never changes the
/// decision: the caller keeps the rejected decision it already had.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("override by {actor:?} is not authorized")]
    OverrideNotAuthorized { actor: String },
    #[error("cannot force-accept a decision in state {from}")]
    InvalidTransition { from: GateState },
    #[error("override requires a non-empty reason")]
    MissingOverrideReason,
}
