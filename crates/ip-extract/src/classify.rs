use std::fmt;

/// Address blocks treated as non-routable.
///
/// Only these six blocks are recognised. Multicast, CGNAT (100.64.0.0/10) and
/// the documentation ranges are reported as public.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReservedRange {
    /// 0.0.0.0/8
    ThisNetwork,
    /// 10.0.0.0/8
    Private10,
    /// 127.0.0.0/8
    Loopback,
    /// 169.254.0.0/16
    LinkLocal,
    /// 172.16.0.0/12
    Private172,
    /// 192.168.0.0/16
    Private192,
}

impl ReservedRange {
    /// The block in CIDR notation.
    pub fn cidr(self) -> &'static str {
        match self {
            ReservedRange::ThisNetwork => "0.0.0.0/8",
            ReservedRange::Private10 => "10.0.0.0/8",
            ReservedRange::Loopback => "127.0.0.0/8",
            ReservedRange::LinkLocal => "169.254.0.0/16",
            ReservedRange::Private172 => "172.16.0.0/12",
            ReservedRange::Private192 => "192.168.0.0/16",
        }
    }
}

impl fmt::Display for ReservedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cidr())
    }
}

/// Decode a dotted octet without bounding it to 0..=255.
#[inline]
fn octet(segment: Option<&str>) -> Option<u32> {
    segment?.parse().ok()
}

/// Determine which reserved block, if any, a dotted-quad falls into.
///
/// Only the first one or two octets are decoded. An unparsable leading octet
/// means the address is treated as public.
pub fn classify(address: &str) -> Option<ReservedRange> {
    let mut segments = address.split('.');
    let first = octet(segments.next())?;
    let second = octet(segments.next());

    match (first, second) {
        (0, _) => Some(ReservedRange::ThisNetwork),
        (10, _) => Some(ReservedRange::Private10),
        (127, _) => Some(ReservedRange::Loopback),
        (169, Some(254)) => Some(ReservedRange::LinkLocal),
        (172, Some(16..=31)) => Some(ReservedRange::Private172),
        (192, Some(168)) => Some(ReservedRange::Private192),
        _ => None,
    }
}

/// True when the address is in one of the [`ReservedRange`] blocks.
#[inline]
pub fn is_reserved(address: &str) -> bool {
    classify(address).is_some()
}
