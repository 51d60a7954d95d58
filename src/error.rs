use thiserror::Error;

/// Errors reported by the folding and backend-selection APIs.
///
/// Searching never fails: malformed input simply does not match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The output buffer handed to a fold call cannot hold the folded bytes.
    #[error("fold output buffer too small: {needed} bytes needed, {capacity} available")]
    BufferTooSmall { needed: usize, capacity: usize },

    /// A backend name that does not match any known backend.
    #[error("unknown backend `{0}`")]
    UnknownBackend(String),

    /// A known backend that the running CPU cannot execute.
    #[error("backend `{0}` is not supported on this CPU")]
    UnavailableBackend(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
