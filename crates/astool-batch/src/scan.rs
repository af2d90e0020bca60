use astool_store::{RecordStore, ScanPolicy};
use astool_types::NamespaceSet;
use tracing::debug;

use crate::console::Console;
use crate::error::BatchResult;
use crate::render::scanned_key;
use crate::report::BatchReport;

/// Print every record of `ns`.
///
/// The cursor always runs with [`ScanPolicy::throttled`]. Errors the cursor
/// reports inline count as failed records and the scan goes on; only failing
/// to open the cursor ends it early.
pub fn scan_records(
    store: &dyn RecordStore,
    ns: &NamespaceSet,
    console: &mut Console<'_>,
) -> BatchResult<BatchReport> {
    let policy = ScanPolicy::throttled();
    debug!(%ns, ?policy, "opening scan cursor");
    let cursor = store.scan(ns, &policy)?;

    let mut report = BatchReport::new();
    for item in cursor {
        match item {
            Ok(record) => {
                let key = scanned_key(record.key.as_ref());
                console.print_record(&key, &record);
                report.record_success(key);
            }
            Err(err) => {
                console.log(format_args!("fail to scan: {err}"));
                report.record_failure("", &err);
            }
        }
    }

    console.log(report.summary());
    report.into_result()
}
