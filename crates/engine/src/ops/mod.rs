use std::path::PathBuf;

use crate::{ResultEngine, store::RecordStore};

mod admin;
mod payments;
mod session;

pub use admin::{EditOutcome, PaymentToggle, RosterEntry};
pub use payments::{PaymentOutcome, PaymentQuote};
pub use session::{
    LoginOutcome, RESERVED_ADMIN_PASSWORD, RESERVED_ADMIN_USERNAME, RegisterOutcome, Session,
};

/// Default roster file, relative to the working directory.
pub const DEFAULT_ROSTER_PATH: &str = "user.txt";

/// Entry point of every operation: owns the roster and keeps the file in
/// sync with it.
#[derive(Debug)]
pub struct Engine {
    store: RecordStore,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    path: Option<PathBuf>,
}

impl EngineBuilder {
    /// Pass the roster file. Defaults to [`DEFAULT_ROSTER_PATH`].
    pub fn path(mut self, path: impl Into<PathBuf>) -> EngineBuilder {
        self.path = Some(path.into());
        self
    }

    /// Construct `Engine`, loading the roster.
    pub fn build(self) -> ResultEngine<Engine> {
        let path = self
            .path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROSTER_PATH));
        Ok(Engine {
            store: RecordStore::open(path)?,
        })
    }
}
