/// Failure to start a search. An unreachable end is *not* an error: it is
/// reported as [`Outcome::NoPath`](crate::Outcome::NoPath).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A search was invoked while another one is in flight.
    #[error("a search is already in flight")]
    Busy,

    /// The grid violates a model invariant the host is supposed to uphold.
    #[error("invalid grid state: {0}")]
    InvalidState(&'static str),
}
