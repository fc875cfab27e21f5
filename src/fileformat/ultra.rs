//! ULTRA tandem-repeat detector output: tab-delimited, no header,
//! 10 fixed columns. Extra trailing columns are ignored.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const ULTRA_COLS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UltraRecord {
    pub seq_id: String,
    pub start: u64,
    pub length: u64,
    pub period: u64,
    pub score: f64,
    pub substitutions: u64,
    pub insertions: u64,
    pub deletions: u64,
    pub consensus: String,
    pub sequence: String,
}

impl UltraRecord {
    pub fn end(&self) -> u64 {
        self.start + self.length
    }

    /// Total edit burden of the array against its consensus.
    pub fn indel_variability(&self) -> u64 {
        self.substitutions + self.insertions + self.deletions
    }
}

pub fn read_ultra(src: impl Read) -> Result<Vec<UltraRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(src);

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let mut row = result.with_context(|| format!("bad ULTRA row {}", i + 1))?;
        // Tolerate one leading header row so our own TSV outputs round-trip.
        if i == 0 && row.get(1).map_or(false, |f| f.parse::<u64>().is_err()) {
            continue;
        }
        if row.len() < ULTRA_COLS {
            bail!(
                "ULTRA row {} has {} columns, expected at least {}",
                i + 1,
                row.len(),
                ULTRA_COLS
            );
        }
        row.truncate(ULTRA_COLS);
        let record: UltraRecord = row
            .deserialize(None)
            .with_context(|| format!("could not parse ULTRA row {}", i + 1))?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_ultra_file(path: &Path) -> Result<Vec<UltraRecord>> {
    let file = File::open(path)
        .with_context(|| format!("could not open ULTRA file {}", path.display()))?;
    read_ultra(file).with_context(|| format!("while reading {}", path.display()))
}

/// Write records as a headered TSV.
pub fn write_ultra(dst: impl Write, records: &[UltraRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(dst);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_ultra_file(path: &Path, records: &[UltraRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    write_ultra(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "glyma.Gm15\t40000100\t920\t92\t187.5\t4\t1\t2\tACGT\tACGTACGT\n";

    #[test]
    fn test_read_basic_row() {
        let records = read_ultra(ROW.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.seq_id, "glyma.Gm15");
        assert_eq!(r.start, 40000100);
        assert_eq!(r.period, 92);
        assert_eq!(r.consensus, "ACGT");
        assert_eq!(r.end(), 40001020);
        assert_eq!(r.indel_variability(), 7);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let row = format!("{}\textra\tcols\n", ROW.trim_end());
        let records = read_ultra(row.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence, "ACGTACGT");
    }

    #[test]
    fn test_header_row_skipped() {
        let input = format!(
            "seq_id\tstart\tlength\tperiod\tscore\tsubstitutions\tinsertions\tdeletions\tconsensus\tsequence\n{}",
            ROW
        );
        let records = read_ultra(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_short_row_rejected() {
        assert!(read_ultra("chr1\t100\t50\n".as_bytes()).is_err());
    }

    #[test]
    fn test_roundtrip_through_header_tsv() {
        let records = read_ultra(ROW.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_ultra(&mut buf, &records).unwrap();
        let reread = read_ultra(buf.as_slice()).unwrap();
        assert_eq!(records, reread);
    }
}
