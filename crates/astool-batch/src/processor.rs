use astool_types::{Key, NamespaceSet, Record};
use tracing::debug;

use crate::console::Console;
use crate::error::{BatchError, BatchResult, KeyError};
use crate::report::BatchReport;
use crate::source::KeySource;

/// What a batch does with each key.
pub trait KeyOperation {
    /// Verb used in failure diagnostics (`fail to <verb> <key>: ..`).
    fn verb(&self) -> &'static str;

    /// Turn a raw input string into a store key.
    fn resolve_key(&self, ns: &NamespaceSet, raw: &str) -> Result<Key, KeyError>;

    /// Run the store operation. A returned record is printed.
    fn perform(&self, key: &Key) -> Result<Option<Record>, KeyError>;

    /// Diagnostic line for a failed key.
    fn describe_failure(&self, raw: &str, err: &KeyError) -> String {
        format!("fail to {} {}: {}", self.verb(), raw, err)
    }
}

/// Run `op` for every key of `source`, in order.
///
/// Per-key failures are logged and tallied; they never stop the batch. The
/// summary line is always written. The returned report may hold failures;
/// callers decide what they mean (see [`BatchReport::into_result`]). A read
/// error of the source is returned instead of the report.
pub fn process<O>(
    op: &O,
    ns: &NamespaceSet,
    source: KeySource<'_>,
    console: &mut Console<'_>,
) -> BatchResult<BatchReport>
where
    O: KeyOperation + ?Sized,
{
    let mut report = BatchReport::new();

    let read = source.for_each_key(|raw| {
        let outcome = op
            .resolve_key(ns, raw)
            .and_then(|key| op.perform(&key));
        match outcome {
            Ok(record) => {
                debug!(key = raw, verb = op.verb(), "key done");
                if let Some(record) = record {
                    console.print_record(raw, &record);
                }
                report.record_success(raw);
            }
            Err(err) => {
                debug!(key = raw, verb = op.verb(), error = %err, "key failed");
                console.log(op.describe_failure(raw, &err));
                report.record_failure(raw, &err);
            }
        }
    });

    console.log(report.summary());

    match read {
        Ok(()) => Ok(report),
        Err(source) => Err(BatchError::Read {
            source,
            failed: report.failure_count(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::{self, BufRead, BufReader, Cursor, Read};

    use astool_types::TypeError;

    /// Records every performed key; fails keys starting with `bad`.
    struct Recording {
        seen: RefCell<Vec<String>>,
    }

    impl Recording {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl KeyOperation for Recording {
        fn verb(&self) -> &'static str {
            "touch"
        }

        fn resolve_key(&self, ns: &NamespaceSet, raw: &str) -> Result<Key, KeyError> {
            if raw.starts_with("bad") {
                return Err(KeyError::Key(TypeError::UnsupportedKey("bad")));
            }
            Ok(Key::new(ns, raw)?)
        }

        fn perform(&self, key: &Key) -> Result<Option<Record>, KeyError> {
            let raw = key.user_key().map(ToString::to_string).unwrap_or_default();
            self.seen.borrow_mut().push(raw);
            Ok(Some(Record::new(1, 0)))
        }
    }

    fn ns() -> NamespaceSet {
        NamespaceSet::new("test", "page")
    }

    fn run(source: KeySource<'_>) -> (BatchResult<BatchReport>, String, String, Recording) {
        let op = Recording::new();
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let result = {
            let mut console = Console::new(&mut out, &mut diag);
            process(&op, &ns(), source, &mut console)
        };
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
            op,
        )
    }

    #[test]
    fn tally_matches_failures() {
        let keys = ["k1", "bad1", "k2", "bad2", "k3"];
        let (result, out, diag, op) = run(KeySource::from_args(keys));
        let report = result.unwrap();

        assert_eq!(report.total(), keys.len());
        assert_eq!(report.failure_count(), 2);
        assert_eq!(op.seen.borrow().as_slice(), ["k1", "k2", "k3"]);
        assert_eq!(out.lines().count(), 3);
        assert!(diag.ends_with("success=3 failure=2\n"));
        assert!(matches!(report.into_result(), Err(BatchError::Failures(2))));
    }

    #[test]
    fn output_follows_input_order() {
        let (_, out, diag, _) = run(KeySource::from_args(["k3", "bad", "k1"]));
        let keys: Vec<String> = out
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["key"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["k3", "k1"]);

        let diag_lines: Vec<&str> = diag.lines().collect();
        assert_eq!(diag_lines.len(), 2);
        assert!(diag_lines[0].starts_with("fail to touch bad: "));
    }

    #[test]
    fn empty_source_is_success() {
        let (result, out, diag, _) = run(KeySource::from_reader(Cursor::new("")));
        let report = result.unwrap();
        assert_eq!(report.total(), 0);
        assert!(report.into_result().is_ok());
        assert!(out.is_empty());
        assert_eq!(diag, "success=0 failure=0\n");
    }

    struct FailAfter(Cursor<Vec<u8>>);

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "disk gone")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn read_error_wins_but_keeps_failure_count() {
        let reader: Box<dyn BufRead> =
            Box::new(BufReader::new(FailAfter(Cursor::new(b"k1\nbad\n".to_vec()))));
        let (result, out, diag, _) = run(KeySource::Lines(reader));

        match result {
            Err(BatchError::Read { failed, .. }) => assert_eq!(failed, 1),
            other => panic!("expected read error, got {other:?}"),
        }
        assert_eq!(out.lines().count(), 1);
        assert!(diag.ends_with("success=1 failure=1\n"));
    }
}
