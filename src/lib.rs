//! Chinese Wall access control
//!
//! An implementation of the Brewer–Nash ("Chinese Wall")
//! conflict-of-interest model: a user may read any known company's data,
//! but once they have accessed a company belonging to a
//! conflict-of-interest group, they are barred from writing to other
//! companies in that same group for the rest of the session.
//!
//! ## Model
//!
//! ```text
//! conflict groups (fixed) -> per-user accessed sets (grow) -> decisions
//! ```
//!
//! - Reads of known companies are always allowed; recording the read is
//!   what can constrain later writes.
//! - Writes are denied inside any group the user has already touched.
//! - Every attempt is recorded in an append-only audit log, and a per-user
//!   conflict report lists the companies now write-forbidden.
//!
//! ## Example
//!
//! ```
//! use chwall::policy::{Action, ConflictGroup, WallPolicy};
//!
//! let mut policy = WallPolicy::new(
//!     vec![ConflictGroup::new(
//!         "Bank",
//!         ["Citibank".to_string(), "Bank of America".to_string()],
//!     )],
//!     true,
//! );
//!
//! assert!(policy.access_company("Alice", "Citibank", Action::Write).allowed);
//! assert!(policy.can_write("Alice", "Bank of America").is_denied());
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod policy;
pub mod shell;

// Re-export main types
pub use audit::{AccessLog, AccessLogEntry, ConflictReport};
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result};
pub use policy::{AccessDecision, AccessOutcome, Action, ConflictGroup, WallPolicy};
