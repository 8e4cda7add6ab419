use log::{debug, info};

use crate::enrich::Enricher;
use crate::error::Result;
use crate::input::FileOrStdin;
use crate::record::AddressRecord;
use crate::report::Columns;

/// The finished report: its column layout and one record per public address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub columns: Columns,
    pub records: Vec<AddressRecord>,
}

/// Extract, count and filter the addresses in raw log text.
pub fn collect_records(text: &[u8]) -> Result<Vec<AddressRecord>> {
    let hits = ip_extract::summarize(text)?;
    debug!("{} distinct public addresses", hits.len());
    Ok(hits.into_iter().map(AddressRecord::from).collect())
}

/// Run the whole pipeline over in-memory log text.
pub fn summarize_text(text: &[u8], enricher: &mut Enricher) -> Result<Summary> {
    let mut records = collect_records(text)?;
    enricher.run(&mut records);
    Ok(Summary {
        columns: enricher.columns(),
        records,
    })
}

/// Read a log and run the whole pipeline over it.
pub fn summarize_log(source: &FileOrStdin, enricher: &mut Enricher) -> Result<Summary> {
    let text = source.read_all()?;
    info!("Read {} bytes from {}", text.len(), source);
    summarize_text(&text, enricher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_first_seen_order() {
        let records = collect_records(b"x 5.5.5.5\ny 127.0.0.1 4.4.4.4 5.5.5.5\n").unwrap();
        let pairs: Vec<(&str, usize)> = records
            .iter()
            .map(|r| (r.address.as_str(), r.try_count))
            .collect();
        assert_eq!(pairs, vec![("5.5.5.5", 2), ("4.4.4.4", 1)]);
    }

    #[test]
    fn without_enrichment_only_base_columns() {
        let summary = summarize_text(b"256.1.1.1 noise\n", &mut Enricher::new()).unwrap();
        assert_eq!(summary.columns, Columns::default());
        assert_eq!(summary.records, vec![AddressRecord::new("256.1.1.1", 1)]);
    }
}
