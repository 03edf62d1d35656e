//! opsdesk client library
//!
//! Resource stores, list filtering and page state for the operations
//! dashboard (tasks, employees, vehicles, locations, schedules, users).
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod filter;
pub mod inspection;
pub mod mock_server;
pub mod models;
pub mod page;
pub mod store;
pub mod transport;

pub use errors::ResourceError;
pub use filter::{DiscreteFilter, FilterState, Searchable, Tally};
pub use models::{Resource, ResourceKind};
pub use page::{DialogMode, PageOutcome, ResourcePage};
pub use store::ResourceStore;
pub use transport::{HttpTransport, MemoryBackend, ResourceTransport};
