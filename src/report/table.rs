//! Terminal table output for the address summary.

use std::io::{self, Write};

use termcolor::{ColorSpec, WriteColor};

use super::Columns;
use crate::record::AddressRecord;

/// Width of each column: the longest cell (or header) in characters.
fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn write_border<W: Write>(out: &mut W, widths: &[usize]) -> io::Result<()> {
    for width in widths {
        write!(out, "+{}", "-".repeat(width + 2))?;
    }
    writeln!(out, "+")
}

fn write_cells<W: WriteColor, S: AsRef<str>>(
    out: &mut W,
    widths: &[usize],
    cells: &[S],
    spec: Option<&ColorSpec>,
) -> io::Result<()> {
    for (width, cell) in widths.iter().zip(cells) {
        let cell = cell.as_ref();
        let pad = width - cell.chars().count();
        write!(out, "| ")?;
        if let Some(spec) = spec {
            out.set_color(spec)?;
            write!(out, "{}", cell)?;
            out.reset()?;
        } else {
            write!(out, "{}", cell)?;
        }
        write!(out, "{} ", " ".repeat(pad))?;
    }
    writeln!(out, "|")
}

/// Print the report as a bordered, left-aligned table.
///
/// The header row is bold when `out` supports colour.
pub fn render_table<W: WriteColor>(
    out: &mut W,
    columns: Columns,
    records: &[AddressRecord],
) -> io::Result<()> {
    let headers = columns.headers();
    let rows: Vec<Vec<String>> = records.iter().map(|r| columns.row(r)).collect();
    let widths = column_widths(&headers, &rows);

    let mut bold = ColorSpec::new();
    bold.set_bold(true);

    write_border(out, &widths)?;
    write_cells(out, &widths, &headers, Some(&bold))?;
    write_border(out, &widths)?;
    for row in &rows {
        write_cells(out, &widths, row, None)?;
    }
    if !rows.is_empty() {
        write_border(out, &widths)?;
    }
    out.flush()
}
