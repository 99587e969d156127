//! Pipeline contract violations.

use std::fmt;

/// Error raised when a pass observes a tree that breaks the pipeline's
/// fixed run-order contract.
///
/// Pattern non-matches are silent no-ops and never reach this type; only
/// genuine misuse of the pipeline (re-running a stage, or running stages
/// out of order) is surfaced, so the run can abort instead of silently
/// mis-transforming the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Signature augmentation was applied to a declaration that already
    /// carries the implicit recomposition parameters. Re-augmenting would
    /// double-append them, so repeated application is rejected.
    AlreadyAugmented {
        /// The offending function's name.
        function: String,
    },
    /// Body recomposition found a composable-shaped declaration whose
    /// parameter list does not end in the implicit composer/change-mask
    /// pair, meaning signature augmentation never ran on it.
    MissingImplicitParams {
        /// The offending function's name.
        function: String,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::AlreadyAugmented { function } => write!(
                f,
                "function `{function}` already carries the implicit recomposition parameters; \
                 signature augmentation must run exactly once"
            ),
            PipelineError::MissingImplicitParams { function } => write!(
                f,
                "function `{function}` is missing the implicit recomposition parameters; \
                 signature augmentation must run before body recomposition"
            ),
        }
    }
}

impl std::error::Error for PipelineError {}
