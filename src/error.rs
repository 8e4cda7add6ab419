use camino::Utf8PathBuf;

/// Error types for the ipreport library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The log file could not be opened or read.
    #[error("failed to read log {path}")]
    LogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV report could not be written.
    #[error("failed to write report to {path}")]
    ReportWrite {
        path: Utf8PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The address matcher could not be compiled.
    #[error(transparent)]
    Pattern(#[from] ip_extract::Error),

    /// The HTTP client for ISP lookups could not be built, or a request failed.
    #[error("ISP lookup request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The ISP service answered with a non-success status.
    #[error("ISP lookup for {address} returned HTTP {status}")]
    HttpStatus {
        address: String,
        status: reqwest::StatusCode,
    },
}

/// Convenience type alias for Results using the library error.
pub type Result<T> = std::result::Result<T, Error>;
