//! Chinese Wall policy module
//!
//! The conflict-of-interest model: a user may read any known company, but
//! once they have accessed a company in a conflict-of-interest group they
//! are barred from writing to the other companies in that group for the
//! rest of the session.
//!
//! ## Decision model
//!
//! - `can_read` / `can_write` are pure predicates returning an
//!   [`AccessDecision`].
//! - [`WallPolicy::access_company`] is the single mutating entry point: it
//!   validates input, consults the predicates, updates the user's accessed
//!   set on success, and appends an audit entry either way.
//!
//! Each user moves through an implicit two-state machine, Unseen →
//! Touched(side), where the side — the set of touched groups — only grows.

pub mod registry;
pub mod types;
pub mod wall;

pub use registry::CompanyRegistry;
pub use types::{AccessDecision, AccessOutcome, Action, ConflictGroup};
pub use wall::WallPolicy;
