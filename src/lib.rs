//! The ipreport library: summarize the public IPv4 addresses in a log.
//!
//! A run reads a whole log, pulls out every dotted-quad shaped substring,
//! counts how often each distinct address occurs, drops non-routable blocks,
//! optionally enriches the survivors with reverse DNS and ipinfo.io details,
//! and writes the result as CSV and as a terminal table.
//!
//! # Examples
//!
//! Summarizing a log without any network lookups:
//!
//! ```rust
//! use ipreport::{summarize_text, Enricher};
//!
//! let log = b"10.0.0.1 connect from 8.8.8.8\n8.8.8.8 retry\n";
//! let summary = summarize_text(log, &mut Enricher::new()).unwrap();
//! assert_eq!(summary.records.len(), 1);
//! assert_eq!(summary.records[0].address, "8.8.8.8");
//! assert_eq!(summary.records[0].try_count, 2);
//! ```
//!
//! Plugging in a custom reverse DNS source:
//!
//! ```rust
//! use ipreport::{Enricher, ReverseDns};
//!
//! struct Static;
//!
//! impl ReverseDns for Static {
//!     fn reverse(&mut self, _address: &str) -> Option<String> {
//!         Some("host.example".to_string())
//!     }
//! }
//!
//! let enricher = Enricher::new().with_reverse_dns(Static);
//! assert!(enricher.columns().rdns);
//! ```

pub mod enrich;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod record;
pub mod report;

pub use crate::enrich::{EnrichOptions, Enricher, IpInfoClient, IpInfoConfig, IspLookup, ReverseDns, SystemResolver};
pub use crate::error::{Error, Result};
pub use crate::pipeline::{collect_records, summarize_log, summarize_text, Summary};
pub use crate::record::{AddressRecord, IspDetails};
pub use crate::report::Columns;
