//! Batch key processing for astool.
//!
//! One pipeline, three front-ends. The pipeline pulls keys from a
//! [`KeySource`], runs one [`KeyOperation`] per key against a
//! [`RecordStore`](astool_store::RecordStore), tallies the outcome of each
//! key into a [`BatchReport`] and renders records through a [`Console`].
//!
//! - [`fetch`] -- get each key and print it as a JSON line
//! - [`delete`] -- normalize each key as a URL and delete it
//! - [`scan`] -- walk a whole namespace/set through a throttled cursor
//!
//! A failing key never aborts a batch: it is logged, counted, and the next
//! key is processed. Only configuration, connection and file-open errors
//! stop a batch before it runs.

pub mod console;
pub mod delete;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod processor;
pub mod render;
pub mod report;
pub mod scan;
pub mod source;

pub use console::Console;
pub use delete::{delete_keys, delete_one, Delete};
pub use error::{BatchError, BatchResult, KeyError};
pub use fetch::{fetch_keys, Fetch};
pub use normalize::first_normalize_url;
pub use processor::{process, KeyOperation};
pub use render::{normalize_value, RecordLine};
pub use report::{BatchReport, Failure};
pub use scan::scan_records;
pub use source::KeySource;
