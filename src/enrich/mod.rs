//! Per-address enrichment with reverse DNS and ISP/geolocation details.
//!
//! The lookups themselves sit behind two small traits, [`ReverseDns`] and
//! [`IspLookup`], so the orchestration in [`Enricher`] can run against the
//! real network services ([`SystemResolver`], [`IpInfoClient`]) or against
//! deterministic fakes.
//!
//! Lookups never fail the batch. Every implementation degrades to an empty
//! value and, at most, a logged warning.

pub mod ipinfo;
pub mod rdns;

use log::{debug, info, warn};

use crate::error::Result;
use crate::record::{AddressRecord, IspDetails};
use crate::report::Columns;

pub use ipinfo::{IpInfoClient, IpInfoConfig};
pub use rdns::SystemResolver;

/// Reverse DNS resolution for a single dotted-quad.
pub trait ReverseDns {
    /// Return the host name for the address, or `None` when there is no
    /// record or the lookup could not be performed.
    fn reverse(&mut self, address: &str) -> Option<String>;
}

/// ISP and geolocation lookup for a single dotted-quad.
pub trait IspLookup {
    /// Fetch whatever details the service knows about the address.
    ///
    /// `token` is the caller's access token; `None` means an unauthenticated
    /// query. Failures yield [`IspDetails::default`].
    fn lookup(&mut self, address: &str, token: Option<&str>) -> IspDetails;
}

/// Which enrichment steps to run, as requested on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnrichOptions {
    pub rdns: bool,
    pub isp: bool,
    /// Access token for the ISP service. Empty tokens are treated as absent.
    pub token: Option<String>,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            rdns: true,
            isp: true,
            token: None,
        }
    }
}

impl EnrichOptions {
    /// Options with both lookups switched off.
    pub fn disabled() -> Self {
        Self {
            rdns: false,
            isp: false,
            token: None,
        }
    }
}

/// Runs the enabled lookups over a list of records, one address at a time.
#[derive(Default)]
pub struct Enricher {
    resolver: Option<Box<dyn ReverseDns>>,
    isp: Option<Box<dyn IspLookup>>,
    token: Option<String>,
}

impl Enricher {
    /// An enricher that performs no lookups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an enricher backed by the system resolver and ipinfo.io, with
    /// only the steps enabled in `options`.
    pub fn from_options(options: &EnrichOptions, config: IpInfoConfig) -> Result<Self> {
        let mut enricher = Enricher::new();
        if options.rdns {
            enricher = enricher.with_reverse_dns(SystemResolver::new());
        }
        if options.isp {
            enricher = enricher.with_isp_lookup(IpInfoClient::new(config)?, options.token.clone());
        }
        Ok(enricher)
    }

    /// Enable reverse DNS with the given resolver.
    pub fn with_reverse_dns(mut self, resolver: impl ReverseDns + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Enable ISP lookups with the given service and optional access token.
    pub fn with_isp_lookup(mut self, lookup: impl IspLookup + 'static, token: Option<String>) -> Self {
        self.isp = Some(Box::new(lookup));
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// The report columns produced by the enabled steps.
    pub fn columns(&self) -> Columns {
        Columns {
            rdns: self.resolver.is_some(),
            isp: self.isp.is_some(),
        }
    }

    /// Fill in the enrichment fields of every record.
    ///
    /// Reverse DNS runs over all records first, then the ISP lookups.
    pub fn run(&mut self, records: &mut [AddressRecord]) {
        if let Some(resolver) = self.resolver.as_mut() {
            info!("Beginning rDNS lookup...");
            for record in records.iter_mut() {
                let host = resolver.reverse(&record.address).unwrap_or_default();
                debug!("rDNS {} -> {:?}", record.address, host);
                record.rdns = Some(host);
            }
        }

        if let Some(lookup) = self.isp.as_mut() {
            if self.token.is_none() {
                warn!("A token for ipinfo.io has not been provided. Limited IP information queries will be performed.");
                warn!("If you're looking for more information than what's provided, provide your access token using the argument --ipinfo-token {{token}}");
            }
            info!("Beginning ISP queries");
            for record in records.iter_mut() {
                let details = lookup.lookup(&record.address, self.token.as_deref());
                debug!("ISP {} -> {:?}", record.address, details);
                record.isp = Some(details);
            }
        }
    }
}
