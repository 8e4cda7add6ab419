use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use dns_lookup::{LookupError, LookupErrorKind};
use log::{debug, warn};

use super::ReverseDns;

/// Reverse DNS through the operating system resolver (`getnameinfo`).
///
/// Calls block until the resolver answers; there is no timeout of our own.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        SystemResolver
    }
}

/// How a finished lookup should be reported.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Host(String),
    NotFound,
    Unreachable,
}

/// `NoName`/`NoData` mean the resolver answered without a PTR record. Every
/// other failure means it could not answer at all.
fn outcome_kind(kind: LookupErrorKind) -> Outcome {
    match kind {
        LookupErrorKind::NoName | LookupErrorKind::NoData => Outcome::NotFound,
        _ => Outcome::Unreachable,
    }
}

fn outcome(ip: Ipv4Addr, answer: Result<String, LookupError>) -> Outcome {
    match answer {
        Ok(host) => Outcome::Host(host),
        Err(err) => {
            debug!("rDNS lookup for {} failed: {:?}", ip, err.kind());
            outcome_kind(err.kind())
        }
    }
}

/// Name lookup only, failing instead of falling back to the numeric form.
#[cfg(unix)]
fn name_of(ip: Ipv4Addr) -> Result<String, LookupError> {
    let sock = SocketAddr::new(IpAddr::V4(ip), 0);
    dns_lookup::getnameinfo(&sock, libc::NI_NAMEREQD | libc::NI_NUMERICSERV).map(|(host, _)| host)
}

#[cfg(windows)]
fn name_of(ip: Ipv4Addr) -> Result<String, LookupError> {
    use windows_sys::Win32::Networking::WinSock::{NI_NAMEREQD, NI_NUMERICSERV};

    let sock = SocketAddr::new(IpAddr::V4(ip), 0);
    dns_lookup::getnameinfo(&sock, (NI_NAMEREQD | NI_NUMERICSERV) as i32).map(|(host, _)| host)
}

impl ReverseDns for SystemResolver {
    fn reverse(&mut self, address: &str) -> Option<String> {
        let ip: Ipv4Addr = match address.parse() {
            Ok(ip) => ip,
            Err(_) => {
                debug!("skipping rDNS for {}: not a valid IPv4 address", address);
                return None;
            }
        };

        match outcome(ip, name_of(ip)) {
            Outcome::Host(host) => Some(host),
            Outcome::NotFound => None,
            Outcome::Unreachable => {
                warn!("Unable to perform rDNS lookup. Are you connected to the internet?");
                None
            }
        }
    }
}
