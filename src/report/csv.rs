//! CSV output for the address summary.

use std::io;

use camino::Utf8Path;
use log::info;

use super::Columns;
use crate::error::{Error, Result};
use crate::record::AddressRecord;

/// Write the header and one row per record to any writer.
pub fn write_records<W: io::Write>(
    writer: W,
    columns: Columns,
    records: &[AddressRecord],
) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(columns.headers())?;
    for record in records {
        wtr.write_record(columns.row(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) the CSV report at `path`.
pub fn write_csv(path: &Utf8Path, columns: Columns, records: &[AddressRecord]) -> Result<()> {
    let report_error = |source: csv::Error| Error::ReportWrite {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(|e| report_error(e.into()))?;
    write_records(io::BufWriter::new(file), columns, records).map_err(report_error)?;
    info!("Wrote {} addresses to {}", records.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(columns: Columns, records: &[AddressRecord]) -> String {
        let mut buf = Vec::new();
        write_records(&mut buf, columns, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_only_when_empty() {
        assert_eq!(render(Columns::default(), &[]), "Address,Try count\n");
    }

    #[test]
    fn quotes_fields_with_commas() {
        let mut record = AddressRecord::new("8.8.8.8", 2);
        record.rdns = Some("dns.google".into());
        let mut isp = crate::record::IspDetails::default();
        isp.isp = Some("AS15169 Google, LLC".into());
        record.isp = Some(isp);

        let out = render(Columns { rdns: true, isp: true }, &[record]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Address,Try count,rDNS result,City,Region,Country,ISP");
        assert_eq!(lines[1], "8.8.8.8,2,dns.google,,,,\"AS15169 Google, LLC\"");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("report_ips.csv")).unwrap();
        std::fs::write(&path, "stale contents that are longer than the report\n".repeat(10)).unwrap();

        write_csv(&path, Columns::default(), &[AddressRecord::new("1.2.3.4", 1)]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Address,Try count\n1.2.3.4,1\n"
        );
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("missing/report.csv")).unwrap();
        let err = write_csv(&path, Columns::default(), &[]).unwrap_err();
        assert!(err.to_string().starts_with("failed to write report to "));
    }
}
