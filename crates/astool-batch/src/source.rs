use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{BatchError, BatchResult};

/// Where the keys of a batch come from.
pub enum KeySource<'a> {
    /// Explicit keys, processed in the given order.
    Args(Vec<String>),
    /// One key per line. Trailing `\n` or `\r\n` is stripped; nothing else.
    /// Bytes that are not UTF-8 are replaced, never rejected.
    Lines(Box<dyn BufRead + 'a>),
}

impl KeySource<'static> {
    /// Open a key file. Failing here means no key is processed.
    pub fn open(path: impl AsRef<Path>) -> BatchResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BatchError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::Lines(Box::new(BufReader::new(file))))
    }
}

impl<'a> KeySource<'a> {
    pub fn from_args<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Args(keys.into_iter().map(Into::into).collect())
    }

    pub fn from_reader(reader: impl BufRead + 'a) -> Self {
        Self::Lines(Box::new(reader))
    }

    /// Feed every key to `f` in order.
    ///
    /// A read error stops the walk; keys already fed stay processed.
    pub fn for_each_key(self, mut f: impl FnMut(&str)) -> io::Result<()> {
        match self {
            Self::Args(keys) => {
                for key in &keys {
                    f(key.as_str());
                }
                Ok(())
            }
            Self::Lines(mut reader) => {
                let mut buf = Vec::new();
                loop {
                    buf.clear();
                    if reader.read_until(b'\n', &mut buf)? == 0 {
                        return Ok(());
                    }
                    let line = trim_line_end(&buf);
                    f(&String::from_utf8_lossy(line));
                }
            }
        }
    }
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => line,
    }
}
