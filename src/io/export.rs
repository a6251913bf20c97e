//! CSV export for the power history buffer.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::session::PowerHistory;

/// Column header for power history export.
pub const HEADER: [&str; 2] = ["timestamp", "power_w"];

/// Exports the power history to a CSV file at the given path.
///
/// Writes a header row followed by one row per sample, oldest first.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_history_csv(history: &PowerHistory, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_history_csv(history, buf)
}

/// Writes the power history as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_history_csv(history: &PowerHistory, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER)?;
    for s in history.iter() {
        wtr.write_record(&[format!("{:.3}", s.timestamp), format!("{:.2}", s.power_w)])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PowerSample;

    fn history(n: usize) -> PowerHistory {
        let mut h = PowerHistory::new(20);
        for i in 0..n {
            h.push(PowerSample {
                timestamp: 1_700_000_000.0 + i as f64,
                power_w: 1150.0 + i as f32,
            });
        }
        h
    }

    #[test]
    fn header_comes_first() {
        let mut buf = Vec::new();
        write_history_csv(&history(1), &mut buf).expect("write should succeed");
        let output = String::from_utf8(buf).expect("csv should be UTF-8");
        assert_eq!(output.lines().next(), Some("timestamp,power_w"));
    }

    #[test]
    fn row_count_is_capped_by_history() {
        let mut buf = Vec::new();
        write_history_csv(&history(30), &mut buf).expect("write should succeed");
        let output = String::from_utf8(buf).expect("csv should be UTF-8");
        let lines: Vec<&str> = output.lines().collect();
        // 1 header + 20 retained samples
        assert_eq!(lines.len(), 21);
        assert_eq!(lines[1], "1700000010.000,1160.00");
    }

    #[test]
    fn empty_history_writes_header_only() {
        let mut buf = Vec::new();
        write_history_csv(&PowerHistory::new(5), &mut buf).expect("write should succeed");
        let output = String::from_utf8(buf).expect("csv should be UTF-8");
        assert_eq!(output.lines().collect::<Vec<_>>(), ["timestamp,power_w"]);
    }

    #[test]
    fn exports_to_file() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("history.csv");
        export_history_csv(&history(3), &path).expect("export should succeed");

        let mut rdr = csv::ReaderBuilder::new()
            .from_path(&path)
            .expect("csv should open");
        assert_eq!(rdr.records().count(), 3);
    }
}
