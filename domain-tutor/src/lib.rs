//! A tutor that guides a student, one question at a time, to the domain of definition of a real
//! function.
//!
//! The student declares a function such as `f(x) = 1/√(x-2)`. For every square root, logarithm
//! and denominator in it, the tutor asks for the condition it imposes, then for the solutions of
//! that condition, and finally for the domain of definition of the whole function. Every answer is
//! checked exactly against the solutions computed by [`domain_solve`].
//!
//! ```
//! use domain_tutor::{store::InMemoryStore, Tutor};
//!
//! let tutor = Tutor::new(InMemoryStore::new());
//! let reply = tutor.process_turn("alice", "f(x) = sqrt(x - 2)");
//! assert!(reply.contains("Quelle condition doit vérifier x - 2"));
//! ```

pub mod config;
mod dialogue;
pub mod matcher;
pub mod messages;
pub mod session;
pub mod store;

pub use config::{TutorConfig, TutorConfigBuilder};
pub use session::{Phase, Session};
pub use store::{InMemoryStore, SessionStore};

use domain_error::Error;
use std::io;

/// An error that occurred during a turn, along with the text its spans point into.
#[derive(Debug)]
pub struct Diagnostic {
    /// The text the error was found in: the student's message, or the normalized function
    /// expression.
    pub source: String,

    /// The error itself.
    pub error: Error,
}

impl Diagnostic {
    /// Report this error to stderr, highlighting its source.
    pub fn report_to_stderr(&self) -> io::Result<()> {
        self.error.report_to_stderr("input", &self.source)
    }
}

/// The tutor, holding the sessions of every conversation.
#[derive(Debug, Default)]
pub struct Tutor<S> {
    store: S,
    config: TutorConfig,
}

impl<S: SessionStore> Tutor<S> {
    /// Creates a tutor with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, TutorConfig::default())
    }

    /// Creates a tutor with the given configuration.
    pub fn with_config(store: S, config: TutorConfig) -> Self {
        Self { store, config }
    }

    /// The store holding the sessions.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// Handles one message of the given conversation and returns the tutor's reply.
    ///
    /// Errors never escape a turn: they are turned into a reply in French.
    pub fn process_turn(&self, conversation_id: &str, text: &str) -> String {
        self.process_turn_verbose(conversation_id, text).0
    }

    /// Like [`Tutor::process_turn`], but also returns the errors that occurred during the turn, so
    /// they can be reported with their source.
    pub fn process_turn_verbose(&self, conversation_id: &str, text: &str) -> (String, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let reply = self.store.update(conversation_id, |slot| {
            dialogue::respond(slot, text, &self.config, &mut diagnostics)
        });
        (reply, diagnostics)
    }
}

/// Handles one message of the given conversation with the default configuration, and returns the
/// tutor's reply.
pub fn process_turn<S: SessionStore>(store: &S, conversation_id: &str, text: &str) -> String {
    let config = TutorConfig::default();
    store.update(conversation_id, |slot| dialogue::respond(slot, text, &config, &mut Vec::new()))
}
