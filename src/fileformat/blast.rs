//! BLAST tabular output (`-outfmt 6`/`7`): 12 columns, `#` comment lines.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlastRecord {
    pub qseqid: String,
    pub sseqid: String,
    pub pident: f64,
    pub length: u64,
    pub mismatch: u64,
    pub gapopen: u64,
    pub qstart: u64,
    pub qend: u64,
    pub sstart: u64,
    pub send: u64,
    pub evalue: f64,
    pub bitscore: f64,
}

impl BlastRecord {
    /// Subject-side interval as (start, length), tolerant of minus-strand
    /// hits where send < sstart.
    pub fn subject_interval(&self) -> (u64, u64) {
        let (lo, hi) = if self.sstart <= self.send {
            (self.sstart, self.send)
        } else {
            (self.send, self.sstart)
        };
        (lo, hi - lo)
    }
}

pub fn read_blast(src: impl Read) -> Result<Vec<BlastRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(src);

    let mut records = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let record: BlastRecord =
            result.with_context(|| format!("could not parse BLAST row {}", i + 1))?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_blast_file(path: &Path) -> Result<Vec<BlastRecord>> {
    let file = File::open(path)
        .with_context(|| format!("could not open BLAST file {}", path.display()))?;
    read_blast(file).with_context(|| format!("while reading {}", path.display()))
}

/// Write headerless outfmt-6 rows, as downstream tools expect.
pub fn write_blast(dst: impl Write, records: &[BlastRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(dst);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_blast_file(path: &Path, records: &[BlastRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    write_blast(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: &str = "\
# BLASTN 2.12.0+
CentGm-1\tGm15\t95.5\t92\t4\t0\t1\t92\t40000100\t40000191\t1e-30\t170.0
CentGm-2\tGm15\t91.0\t91\t8\t1\t1\t91\t40000300\t40000210\t2e-25\t150.0
";

    #[test]
    fn test_read_skips_comments() {
        let records = read_blast(ROWS.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].qseqid, "CentGm-1");
        assert_eq!(records[0].pident, 95.5);
    }

    #[test]
    fn test_subject_interval_minus_strand() {
        let records = read_blast(ROWS.as_bytes()).unwrap();
        assert_eq!(records[1].subject_interval(), (40000210, 90));
    }

    #[test]
    fn test_write_is_headerless() {
        let records = read_blast(ROWS.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_blast(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("CentGm-1\t"));
        assert_eq!(read_blast(text.as_bytes()).unwrap(), records);
    }
}
