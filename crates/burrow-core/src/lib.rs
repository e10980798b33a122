//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the types shared by the lifecycle manager, the
//! storage backends and the HTTP gateway: short URL identifiers, stored
//! records, URL validation, the clock abstraction and the [`Backend`]
//! contract every persistence implementation fulfils.

pub mod backend;
pub mod clock;
pub mod error;
pub mod record;
pub mod short_url_id;
pub mod validation;

pub use backend::Backend;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{RecordError, StorageError, ValidationError};
pub use record::{ShortUrlRecord, StoredRecord};
pub use short_url_id::ShortUrlId;
