//! Report output for the address summary.
//!
//! This module lays out the report columns and writes them:
//! - [`csv`] - the CSV file, the canonical artifact
//! - [`table`] - a bordered table for the terminal

pub mod csv;
pub mod table;

use crate::record::AddressRecord;

pub use self::csv::{write_csv, write_records};
pub use self::table::render_table;

/// Default CSV file name, written to the current working directory.
pub const DEFAULT_REPORT_PATH: &str = "report_ips.csv";

/// Which optional column groups appear in the report.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Columns {
    /// Reverse DNS ran; adds `rDNS result`.
    pub rdns: bool,
    /// ISP lookups ran; adds `City`, `Region`, `Country`, `ISP`.
    pub isp: bool,
}

impl Columns {
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec!["Address", "Try count"];
        if self.rdns {
            headers.push("rDNS result");
        }
        if self.isp {
            headers.extend(["City", "Region", "Country", "ISP"]);
        }
        headers
    }

    /// Render a record as one row of cells; missing values become "".
    pub fn row(&self, record: &AddressRecord) -> Vec<String> {
        let mut row = vec![record.address.clone(), record.try_count.to_string()];
        if self.rdns {
            row.push(record.rdns.clone().unwrap_or_default());
        }
        if self.isp {
            let details = record.isp.clone().unwrap_or_default();
            row.extend(
                [details.city, details.region, details.country, details.isp]
                    .into_iter()
                    .map(Option::unwrap_or_default),
            );
        }
        row
    }
}
