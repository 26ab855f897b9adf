//! # Apiscribe Core
//!
//! The recorder session that turns observed HTTP exchanges into a persisted
//! Swagger 2 document.
//!
//! - [`Recorder`] - owns the document for one test run: load, record, save
//! - [`DocumentStore`] - where the document lives ([`JsonFileStore`],
//!   [`MemoryStore`])
//! - [`SessionError`] / [`StoreError`] - error types

#![doc(html_root_url = "https://docs.rs/apiscribe-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod session;
mod store;

pub use error::{SessionError, SessionResult, StoreError};
pub use session::{metadata_from, Recorder};
pub use store::{DocumentStore, JsonFileStore, MemoryStore};
