use ip_extract::AddressCount;
use serde::Deserialize;

/// Location and network owner details for one address.
///
/// Every field is independently optional; the ISP service omits fields it
/// does not know, and bogon or failed lookups leave all of them empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct IspDetails {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Reported by ipinfo.io as `org`, e.g. "AS15169 Google LLC".
    #[serde(default, rename = "org")]
    pub isp: Option<String>,
}

/// One distinct public address from the log with its enrichment results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressRecord {
    pub address: String,
    pub try_count: usize,
    /// `None` until reverse DNS runs, `Some("")` when it ran and found nothing.
    pub rdns: Option<String>,
    pub isp: Option<IspDetails>,
}

impl AddressRecord {
    pub fn new(address: impl Into<String>, try_count: usize) -> Self {
        Self {
            address: address.into(),
            try_count,
            rdns: None,
            isp: None,
        }
    }
}

impl From<AddressCount> for AddressRecord {
    fn from(hit: AddressCount) -> Self {
        AddressRecord::new(hit.address, hit.try_count)
    }
}
