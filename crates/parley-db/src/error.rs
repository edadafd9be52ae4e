use thiserror::Error;

/// Failures surfaced by the store.
///
/// Absence is not a failure: lookups return `Ok(None)` when no row matches.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened or bootstrapped. The caller must not
    /// serve requests against a store that failed to initialize.
    #[error("store initialization failed: {source}")]
    Init {
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed while serving `operation`. Never retried here;
    /// retry policy belongs to the caller.
    #[error("store query failed in {operation}: {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// The connection lock was poisoned by a panicking holder.
    #[error("store lock poisoned in {operation}")]
    Poisoned { operation: &'static str },
}
