//! Record store access for astool.
//!
//! The batch pipeline only ever talks to a [`RecordStore`]: single-key get,
//! single-key delete, and a scan cursor over a whole namespace/set. There is
//! no batching, retrying or caching at this layer.
//!
//! # Storage Backends
//!
//! - [`InMemoryRecordStore`] -- `HashMap`-based store for tests and embedding,
//!   with fault injection for per-key and per-record errors
//! - [`AerospikeStore`] -- blocking Aerospike client (feature `aerospike`,
//!   on by default)
//!
//! # Design Rules
//!
//! 1. One store handle is shared by reference for a whole invocation.
//! 2. Operations are issued strictly one at a time.
//! 3. A missing record is an error for `get` and a `false` for `delete`.
//! 4. Scans always run with the policy they are handed; see
//!    [`ScanPolicy::throttled`].

pub mod config;
pub mod error;
pub mod memory;
pub mod policy;
pub mod traits;

#[cfg(feature = "aerospike")]
pub mod aerospike_store;

pub use config::ClientConfig;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryRecordStore;
pub use policy::{Priority, ScanPolicy};
pub use traits::{RecordCursor, RecordStore};

#[cfg(feature = "aerospike")]
pub use aerospike_store::AerospikeStore;
