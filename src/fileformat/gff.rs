//! GFF3: 9 tab-separated columns, `#`/`##` comment lines.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GffRecord {
    pub seqid: String,
    pub source: String,
    #[serde(rename = "type")]
    pub feature_type: String,
    pub start: u64,
    pub end: u64,
    pub score: String,
    pub strand: String,
    pub phase: String,
    pub attributes: String,
}

impl GffRecord {
    pub fn interval(&self) -> (u64, u64) {
        (self.start, self.end.saturating_sub(self.start))
    }
}

pub fn read_gff(src: impl Read) -> Result<Vec<GffRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .from_reader(src);

    let mut records = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let record: GffRecord =
            result.with_context(|| format!("could not parse GFF row {}", i + 1))?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_gff_file(path: &Path) -> Result<Vec<GffRecord>> {
    let file =
        File::open(path).with_context(|| format!("could not open GFF file {}", path.display()))?;
    read_gff(file).with_context(|| format!("while reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GFF: &str = "\
##gff-version 3
Gm01\trepeatmasker\tdispersed_repeat\t1000\t1500\t250\t+\t.\tID=rep1
Gm01\trepeatmasker\tgene\t2000\t2500\t.\t-\t.\tID=g1
";

    #[test]
    fn test_read_skips_directives() {
        let records = read_gff(GFF.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].feature_type, "dispersed_repeat");
        assert_eq!(records[0].interval(), (1000, 500));
    }
}
