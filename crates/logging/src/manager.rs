//! crates/logging/src/manager.rs
//! Process-wide owner of the shared [`Logger`].
//!
//! The manager follows an explicit `Uninitialized -> Ready` lifecycle guarded
//! by a mutex. [`Manager::create`] is a single critical section, so two racing
//! creators cannot both succeed; [`Manager::reset`] returns to
//! `Uninitialized`. Loggers handed out before a reset stay valid and keep
//! their configuration: they are simply no longer reachable through the
//! manager.
//!
//! Lifecycle transitions are reported as `tracing` events under the
//! `logging::manager` target and never through the managed logger itself.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{LoggerConfig, LoggerConfigUpdate};
use crate::error::LoggingError;
use crate::levels::Level;
use crate::logger::Logger;
use crate::sink::SharedSink;

enum ManagerState {
    Uninitialized,
    Ready(Arc<Manager>),
}

static MANAGER: Mutex<ManagerState> = Mutex::new(ManagerState::Uninitialized);

#[cfg(test)]
pub(crate) static TEST_LOCK: Mutex<()> = Mutex::new(());

fn state() -> MutexGuard<'static, ManagerState> {
    MANAGER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The process-wide logger owner.
///
/// # Examples
///
/// ```
/// use logging::{Level, LoggerConfig, Manager, args};
///
/// let manager = Manager::create(LoggerConfig::new().with_level(Level::Debug)).unwrap();
/// assert!(Manager::create(LoggerConfig::new()).is_err());
///
/// manager.logger().debug(args!["ready"]).unwrap();
/// assert!(Manager::reset());
/// assert!(Manager::get().is_err());
/// ```
#[derive(Debug)]
pub struct Manager {
    logger: Arc<Logger>,
}

impl Manager {
    /// Creates the singleton from a complete configuration.
    ///
    /// # Errors
    ///
    /// [`LoggingError::AlreadyInitialized`] when a manager already exists.
    pub fn create(config: LoggerConfig) -> Result<Arc<Self>, LoggingError> {
        let mut state = state();
        if matches!(*state, ManagerState::Ready(_)) {
            return Err(LoggingError::AlreadyInitialized);
        }

        let level = config.level();
        let manager = Arc::new(Self {
            logger: Arc::new(Logger::new(config)),
        });
        *state = ManagerState::Ready(Arc::clone(&manager));
        tracing::debug!(target: "logging::manager", %level, "logger manager created");
        Ok(manager)
    }

    /// Returns the singleton.
    ///
    /// # Errors
    ///
    /// [`LoggingError::NotInitialized`] before [`Manager::create`].
    pub fn get() -> Result<Arc<Self>, LoggingError> {
        match &*state() {
            ManagerState::Ready(manager) => Ok(Arc::clone(manager)),
            ManagerState::Uninitialized => Err(LoggingError::NotInitialized),
        }
    }

    /// Discards the singleton, permitting a later [`Manager::create`].
    ///
    /// Returns `true` when a manager was discarded.
    pub fn reset() -> bool {
        let previous = std::mem::replace(&mut *state(), ManagerState::Uninitialized);
        let discarded = matches!(previous, ManagerState::Ready(_));
        if discarded {
            tracing::debug!(target: "logging::manager", "logger manager reset");
        }
        discarded
    }

    /// Reports whether the singleton exists.
    #[must_use]
    pub fn is_initialized() -> bool {
        matches!(*state(), ManagerState::Ready(_))
    }

    /// Returns the shared logger.
    #[must_use]
    pub fn logger(&self) -> Arc<Logger> {
        Arc::clone(&self.logger)
    }

    /// Merges a partial configuration into the shared logger.
    ///
    /// Never fails; an empty update is a no-op.
    pub fn set_logger_config(&self, update: LoggerConfigUpdate) {
        tracing::trace!(target: "logging::manager", ?update, "merging logger configuration");
        self.logger.set_config(update);
    }

    /// Installs or clears the sink override for a single level.
    ///
    /// Equivalent to a [`LoggerConfigUpdate`] carrying only that level.
    pub fn set_logger(&self, level: Level, sink: Option<SharedSink>) {
        self.set_logger_config(LoggerConfigUpdate::new().level_sink(level, sink));
    }

    /// Replaces the threshold of the shared logger.
    pub fn set_level(&self, level: Level) {
        tracing::debug!(target: "logging::manager", %level, "log level changed");
        self.logger.set_level(level);
    }
}

/// Returns the shared logger of the singleton manager.
///
/// # Errors
///
/// [`LoggingError::NotInitialized`] before [`Manager::create`].
pub fn get_logger() -> Result<Arc<Logger>, LoggingError> {
    Manager::get().map(|manager| manager.logger())
}
