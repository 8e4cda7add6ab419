use rustc_hash::FxHashMap;

use crate::classify::is_reserved;
use crate::extractor::LineMatches;

/// A distinct public address and how many times it occurred in the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressCount {
    pub address: String,
    pub try_count: usize,
}

impl AddressCount {
    pub fn new(address: impl Into<String>, try_count: usize) -> Self {
        Self {
            address: address.into(),
            try_count,
        }
    }
}

/// Split per-line matches into a flat list with one entry per occurrence.
///
/// Lines with several matches contribute one entry each; lines without any
/// contribute nothing.
pub fn flatten(lines: Vec<LineMatches>) -> Vec<String> {
    lines.into_iter().flatten().collect()
}

/// Deduplicate a flat match list, count occurrences and drop reserved addresses.
///
/// Blank entries are ignored. The result is ordered by first appearance and
/// every `try_count` is the number of times that exact string appears in
/// `flat`.
pub fn tally(flat: &[String]) -> Vec<AddressCount> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut counts: Vec<AddressCount> = Vec::new();

    for address in flat.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        match index.get(address) {
            Some(&slot) => counts[slot].try_count += 1,
            None => {
                index.insert(address, counts.len());
                counts.push(AddressCount::new(address, 1));
            }
        }
    }

    counts.retain(|hit| !is_reserved(&hit.address));
    counts
}
