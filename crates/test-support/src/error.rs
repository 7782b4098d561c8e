use thiserror::Error;

/// Usage errors of a [`TestSink`](crate::TestSink).
///
/// When raised from inside a logger call the error arrives wrapped in
/// [`LoggingError::Sink`](logging::LoggingError::Sink) and can be recovered
/// with a downcast.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SessionError {
    /// Output arrived while no session was active.
    #[error("no active test session; call start_test before logging")]
    NoActiveTest,
    /// A session was started while another one was still active.
    #[error("test session {active:?} is still active; end it before starting {requested:?}")]
    SessionAlreadyActive {
        /// Identifier of the running session.
        active: String,
        /// Identifier that was rejected.
        requested: String,
    },
}
