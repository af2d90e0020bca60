use std::fmt::Display;
use std::io::{self, Write};

use astool_types::Record;

use crate::render::RecordLine;

/// Output and diagnostic streams of one invocation.
///
/// Records go to `output`, everything else to `diagnostics`. Built once per
/// command and handed by `&mut` to every processing function.
pub struct Console<'w> {
    output: &'w mut dyn Write,
    diagnostics: &'w mut dyn Write,
}

impl<'w> Console<'w> {
    pub fn new(output: &'w mut dyn Write, diagnostics: &'w mut dyn Write) -> Self {
        Self {
            output,
            diagnostics,
        }
    }

    /// Write one diagnostic line.
    pub fn log(&mut self, message: impl Display) {
        // Nowhere left to report a broken diagnostic stream.
        let _ = writeln!(self.diagnostics, "{message}");
        let _ = self.diagnostics.flush();
    }

    /// Write one record as a JSON line.
    pub fn write_record(&mut self, key: &str, record: &Record) -> io::Result<()> {
        let line = RecordLine::new(key, record);
        serde_json::to_writer(&mut *self.output, &line)?;
        self.output.write_all(b"\n")
    }

    /// Write one record, logging instead of failing if the output breaks.
    pub fn print_record(&mut self, key: &str, record: &Record) {
        if let Err(e) = self.write_record(key, record) {
            self.log(format_args!("could not print {key}: {e}"));
        }
    }
}
