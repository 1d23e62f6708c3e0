//! Store Layer
//!
//! In-memory state mirrored to the repositories: the entry ledger and the
//! logged-in session.

mod ledger;
mod session;

pub use ledger::{Change, LedgerStore};
pub use session::SessionHolder;
