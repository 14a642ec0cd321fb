//! Record storage for a customer-complaint intake service.
//!
//! Each collection (users, cases, case updates, admins, channel config) is a
//! [`RecordStore`]: read everything, find by predicate, create, patch, delete.
//! Two backends honor that contract:
//!
//! - [`FileStore`]: one pretty-printed JSON array per collection on disk.
//! - [`RemoteTable`]: rows of a PostgREST-style HTTP table API
//!   (the HTTP client needs the `remote` feature, on by default).
//!
//! Pick one at startup from a [`StoreConfig`] and never think about it again:
//!
//! ```rust,no_run
//! use casebook::{Storage, StoreConfig};
//!
//! let storage = Storage::open(StoreConfig::from_env()).unwrap();
//! let open_cases = storage.cases_for_user("1718000000000-abc123xyz").unwrap();
//! ```
//!
//! **Single-process only** for the file backend. Mutations through one store
//! are serialized, but two processes writing the same directory clobber each
//! other (last writer wins).

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod error;
pub mod file;
pub mod ids;
pub mod lenient;
pub mod models;
pub mod persist;
pub mod record;
pub mod remote;
pub mod serializer;
pub mod storage;
pub mod validate;

pub use backend::{Predicate, RecordStore};
pub use config::{RemoteConfig, StoreConfig};
pub use error::{Error, Result};
pub use file::{FileStore, FileStoreBuilder};
pub use record::{Patch, Record};
pub use remote::{HttpClient, RemoteTable, RestRequest, RestResponse};
pub use storage::{BackendKind, Collection, Selector, Storage};

#[cfg(feature = "remote")]
pub use remote::RestClient;
