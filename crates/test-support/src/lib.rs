#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Session-scoped capture sinks for tests.
//!
//! [`TestSink`] keeps one buffer per level for every named session and
//! records only while a session is active, so tests sharing a logger can
//! assert on their own output without seeing anyone else's. Independent
//! instances have disjoint storage.

mod error;
mod session;

pub use error::SessionError;
pub use session::TestSink;
