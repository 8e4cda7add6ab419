use camino::Utf8PathBuf;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};

use crate::error::{Error, Result};

/// A log source that can be either a file or stdin.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub enum FileOrStdin {
    /// Input from a file.
    File(Utf8PathBuf),
    /// Input from stdin.
    #[default]
    Stdin,
}

impl fmt::Display for FileOrStdin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOrStdin::File(path) => write!(f, "{}", path),
            FileOrStdin::Stdin => write!(f, "<stdin>"),
        }
    }
}

impl FileOrStdin {
    /// Create a new FileOrStdin from a path.
    ///
    /// If the path is "-", stdin is used.
    pub fn from_path(path: Utf8PathBuf) -> Self {
        if path.as_str() == "-" {
            FileOrStdin::Stdin
        } else {
            FileOrStdin::File(path)
        }
    }

    /// Read the whole source into memory.
    ///
    /// Logs are kept as raw bytes; stray non-UTF-8 sequences are harmless to
    /// the address scan.
    pub fn read_all(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = match self {
            FileOrStdin::File(path) => File::open(path)
                .map(BufReader::new)
                .and_then(|mut rdr| rdr.read_to_end(&mut buf)),
            FileOrStdin::Stdin => io::stdin().lock().read_to_end(&mut buf),
        };
        read.map_err(|source| Error::LogRead {
            path: self.to_string(),
            source,
        })?;
        Ok(buf)
    }
}
