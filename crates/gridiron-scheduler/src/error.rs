use thiserror::Error;

use gridiron_providers::ProviderError;

/// Report-generation failure inside a job's action.
///
/// Caught at the job-execution boundary by the poll loop; never terminates
/// the loop or blocks other jobs in the same tick.
#[derive(Debug, Error)]
pub enum ActionError {
    /// An upstream fetch the report depends on failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The data came back but lacks what the report needs
    /// (e.g. no stat lines yet for the requested week).
    #[error("Missing data: {0}")]
    MissingData(String),
}
