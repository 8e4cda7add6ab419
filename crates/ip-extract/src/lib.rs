//! Permissive IPv4 extraction and hit counting for free-form log text.
//!
//! `ip-extract` is the core of `ipreport`. It finds every dotted-quad shaped
//! substring in a log, counts how often each one occurs, and drops the
//! addresses that fall into well known non-routable blocks. It performs no
//! I/O and no network access.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ip_extract::summarize;
//!
//! # fn main() -> Result<(), ip_extract::Error> {
//! let log = b"10.0.0.1 connect from 8.8.8.8\n8.8.8.8 retry\n";
//! for hit in summarize(log)? {
//!     println!("{} seen {} times", hit.address, hit.try_count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Matching rules
//!
//! The extractor is deliberately loose: any four groups of one to three
//! digits joined by dots is a match, so `999.999.999.999` is reported like
//! any other address. The [`classify`] step only looks at the first one or two
//! octets and recognises six blocks (see [`ReservedRange`]); everything else,
//! including out-of-range octets, is treated as publicly routable.
//!
//! ## Pipeline
//!
//! ```no_run
//! use ip_extract::{flatten, tally, Extractor};
//!
//! # fn main() -> Result<(), ip_extract::Error> {
//! let extractor = Extractor::new()?;
//! let per_line = extractor.scan(b"from 1.2.3.4 to 5.6.7.8\n");
//! let flat = flatten(per_line);
//! let hits = tally(&flat);
//! assert_eq!(hits.len(), 2);
//! # Ok(())
//! # }
//! ```

mod classify;
mod extractor;
mod tally;

pub use classify::{classify, is_reserved, ReservedRange};
pub use extractor::{Extractor, LineMatches};
pub use tally::{flatten, tally, AddressCount};

/// Errors raised while preparing the extractor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dotted-quad pattern failed to parse.
    #[error("invalid address pattern: {0}")]
    Syntax(#[from] regex_syntax::Error),

    /// The regex engine could not be built from the parsed pattern.
    #[error("failed to build address matcher: {0}")]
    Build(#[from] regex_automata::meta::BuildError),
}

/// Run extraction, flattening and counting over a whole log in one call.
///
/// The result holds one entry per distinct public address, in the order the
/// address first appears in `text`.
pub fn summarize(text: &[u8]) -> Result<Vec<AddressCount>, Error> {
    let extractor = Extractor::new()?;
    Ok(tally(&flatten(extractor.scan(text))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_counts_and_filters() {
        let hits = summarize(b"10.0.0.1 connect from 8.8.8.8\n8.8.8.8 retry\n").unwrap();
        assert_eq!(hits, vec![AddressCount::new("8.8.8.8", 2)]);
    }

    #[test]
    fn summarize_empty_log() {
        assert!(summarize(b"").unwrap().is_empty());
        assert!(summarize(b"\n\n   \n").unwrap().is_empty());
        assert!(summarize(b"no addresses here, v1.2 only\n").unwrap().is_empty());
    }
}
