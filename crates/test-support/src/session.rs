use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logging::{Level, LoggerConfigUpdate, Output, PluginError, SharedSink, Sink};

use crate::error::SessionError;

type Buffers = [Vec<Output>; Level::COUNT];

#[derive(Default)]
struct SessionState {
    sessions: HashMap<String, Buffers>,
    active: Option<String>,
}

impl SessionState {
    fn active_buffers(&self) -> Result<&Buffers, SessionError> {
        self.active
            .as_ref()
            .and_then(|id| self.sessions.get(id))
            .ok_or(SessionError::NoActiveTest)
    }
}

/// Capture sink with named, session-scoped buffers.
///
/// A session is opened with [`TestSink::start_test`] and closed with
/// [`TestSink::end_test`]. While it is active, output recorded through the
/// per-level sinks lands in that session's buffer for the level; outside a
/// session recording fails with [`SessionError::NoActiveTest`]. Buffers
/// outlive their session and are reused when the same id is started again.
///
/// Clones are handles to the same instance. Separately constructed instances
/// never share storage, even for equal session ids.
///
/// # Examples
///
/// ```
/// use logging::{Level, Logger, LoggerConfig, RecordFormatter, args};
/// use std::sync::Arc;
/// use test_support::TestSink;
///
/// let capture = TestSink::new();
/// let logger = Logger::new(LoggerConfig::new().with_formatter(Arc::new(RecordFormatter)));
/// logger.set_config(capture.logger_map());
///
/// capture.start_test("startup").unwrap();
/// logger.warn(args!["low disk"]).unwrap();
/// capture.end_test("startup");
///
/// let last = capture.last_message_for("startup", Level::Warn).unwrap();
/// assert_eq!(last.as_record().unwrap().message, "low disk");
/// assert!(logger.warn(args!["late"]).is_err());
/// ```
#[derive(Clone, Default)]
pub struct TestSink {
    state: Arc<Mutex<SessionState>>,
}

impl TestSink {
    /// Creates an instance with no sessions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the session `id`, creating empty buffers the first time.
    ///
    /// # Errors
    ///
    /// [`SessionError::SessionAlreadyActive`] while any session is active.
    pub fn start_test(&self, id: impl Into<String>) -> Result<(), SessionError> {
        let id = id.into();
        let mut state = self.lock();
        if let Some(active) = &state.active {
            return Err(SessionError::SessionAlreadyActive {
                active: active.clone(),
                requested: id,
            });
        }
        state.sessions.entry(id.clone()).or_default();
        state.active = Some(id);
        Ok(())
    }

    /// Closes the session `id` if it is the active one.
    ///
    /// Any other id is ignored. Returns `true` when a session was closed. The
    /// session's buffers are kept for inspection.
    pub fn end_test(&self, id: &str) -> bool {
        let mut state = self.lock();
        if state.active.as_deref() == Some(id) {
            state.active = None;
            true
        } else {
            false
        }
    }

    /// Returns the active session id.
    #[must_use]
    pub fn active_session(&self) -> Option<String> {
        self.lock().active.clone()
    }

    /// Appends `output` to the active session's buffer for `level`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoActiveTest`] outside a session.
    pub fn record(&self, level: Level, output: Output) -> Result<(), SessionError> {
        let mut state = self.lock();
        let state = &mut *state;
        let id = state.active.as_ref().ok_or(SessionError::NoActiveTest)?;
        let buffers = state.sessions.entry(id.clone()).or_default();
        buffers[level.index()].push(output);
        Ok(())
    }

    /// Returns the active session's outputs for `level`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoActiveTest`] outside a session.
    pub fn messages(&self, level: Level) -> Result<Vec<Output>, SessionError> {
        let state = self.lock();
        Ok(state.active_buffers()?[level.index()].clone())
    }

    /// Returns the active session's latest output for `level`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoActiveTest`] outside a session.
    pub fn last_message(&self, level: Level) -> Result<Option<Output>, SessionError> {
        let state = self.lock();
        Ok(state.active_buffers()?[level.index()].last().cloned())
    }

    /// Returns the outputs of session `id` for `level`; empty for unknown ids.
    #[must_use]
    pub fn messages_for(&self, id: &str, level: Level) -> Vec<Output> {
        self.lock()
            .sessions
            .get(id)
            .map(|buffers| buffers[level.index()].clone())
            .unwrap_or_default()
    }

    /// Returns the latest output of session `id` for `level`.
    #[must_use]
    pub fn last_message_for(&self, id: &str, level: Level) -> Option<Output> {
        self.lock()
            .sessions
            .get(id)
            .and_then(|buffers| buffers[level.index()].last().cloned())
    }

    /// Empties every buffer of session `id`. Returns `false` for unknown ids.
    pub fn clear(&self, id: &str) -> bool {
        match self.lock().sessions.get_mut(id) {
            Some(buffers) => {
                buffers.iter_mut().for_each(Vec::clear);
                true
            }
            None => false,
        }
    }

    /// Returns a sink recording into this instance at `level`.
    #[must_use]
    pub fn sink_for(&self, level: Level) -> SharedSink {
        Arc::new(LevelSink {
            owner: self.clone(),
            level,
        })
    }

    /// Returns an update binding every emitting level to this instance.
    #[must_use]
    pub fn logger_map(&self) -> LoggerConfigUpdate {
        Level::ALL
            .into_iter()
            .filter(|level| *level != Level::Off)
            .fold(LoggerConfigUpdate::new(), |update, level| {
                update.map_level(level, self.sink_for(level))
            })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for TestSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        let mut sessions: Vec<_> = state.sessions.keys().collect();
        sessions.sort();
        f.debug_struct("TestSink")
            .field("active", &state.active)
            .field("sessions", &sessions)
            .finish()
    }
}

/// Level-bound handle produced by [`TestSink::sink_for`].
struct LevelSink {
    owner: TestSink,
    level: Level,
}

impl Sink for LevelSink {
    fn write(&self, output: &Output) -> Result<(), PluginError> {
        self.owner.record(self.level, output.clone())?;
        Ok(())
    }
}
