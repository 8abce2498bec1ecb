//! Taxpayer roster and tax computation.
//!
//! The [`Engine`] loads the roster from a flat `|`-delimited file, computes
//! income, property and vehicle taxes through the [`tax`] module and rewrites
//! the file after every change.
//!
//! ```rust,no_run
//! use engine::{Engine, LoginOutcome};
//!
//! let engine = Engine::builder().path("user.txt").build()?;
//! if let LoginOutcome::Session(session) = engine.login("budi", "rahasia") {
//!     println!("{}", engine::tax::total_tax(session.profile()));
//! }
//! # Ok::<(), engine::EngineError>(())
//! ```

pub use commands::{PaymentChoice, Registration, TaxpayerEdit};
pub use error::EngineError;
pub use money::Money;
pub use ops::{
    DEFAULT_ROSTER_PATH, EditOutcome, Engine, EngineBuilder, LoginOutcome, PaymentOutcome,
    PaymentQuote, PaymentToggle, RESERVED_ADMIN_PASSWORD, RESERVED_ADMIN_USERNAME, RegisterOutcome,
    RosterEntry, Session,
};
pub use store::RecordStore;
pub use taxpayer::{FIELD_COUNT, FIELD_DELIMITER, Role, Taxpayer};

mod commands;
mod error;
mod money;
mod ops;
mod store;
pub mod tax;
mod taxpayer;

type ResultEngine<T> = Result<T, EngineError>;
