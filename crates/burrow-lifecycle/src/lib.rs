//! Short URL lifecycle: the create-or-reuse decision and redirect resolution.
//!
//! [`MappingManager`] validates input, derives identifiers, consults a
//! [`Backend`](burrow_core::Backend) and evaluates expiry. Every request ends
//! in an immutable outcome value ([`CreateOutcome`] or [`ResolveOutcome`]);
//! turning those into HTTP responses is left to the caller.

pub mod lifecycle;
pub mod manager;
pub mod outcome;
pub mod settings;

pub use lifecycle::MappingLifecycle;
pub use manager::MappingManager;
pub use outcome::{CreateOutcome, ResolveOutcome};
pub use settings::{LifecycleSettings, DEFAULT_CREATION_PATH, DEFAULT_TTL_SECONDS};
