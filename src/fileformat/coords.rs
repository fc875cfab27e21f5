//! MUMmer `show-coords -T` tables. The first lines name the input files
//! and program, followed by a column header; data rows then carry 9, 11 or
//! 13 tab-separated fields depending on the -l/-c flags used.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct CoordsRecord {
    pub s1: u64,
    pub e1: u64,
    pub s2: u64,
    pub e2: u64,
    pub len1: u64,
    pub len2: u64,
    pub pct_idy: f64,
    pub len_r: Option<u64>,
    pub len_q: Option<u64>,
    pub cov_r: Option<f64>,
    pub cov_q: Option<f64>,
    pub ref_tag: String,
    pub qry_tag: String,
}

pub fn read_coords(src: impl Read) -> Result<Vec<CoordsRecord>> {
    let mut records = Vec::new();
    for (i, line) in BufReader::new(src).lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.split('\t').collect();
        // Preamble and header lines: first field is not an integer.
        if fields.is_empty() || fields[0].parse::<u64>().is_err() {
            continue;
        }
        records.push(
            parse_row(&fields).with_context(|| format!("bad coords row at line {}", i + 1))?,
        );
    }
    Ok(records)
}

fn parse_row(fields: &[&str]) -> Result<CoordsRecord> {
    if fields.len() < 9 {
        bail!("expected at least 9 columns, got {}", fields.len());
    }
    let int = |i: usize| -> Result<u64> { Ok(fields[i].trim().parse()?) };
    let float = |i: usize| -> Result<f64> { Ok(fields[i].trim().parse()?) };

    let (len_r, len_q, cov_r, cov_q) = match fields.len() {
        9 => (None, None, None, None),
        11 => (Some(int(7)?), Some(int(8)?), None, None),
        13 => (
            Some(int(7)?),
            Some(int(8)?),
            Some(float(9)?),
            Some(float(10)?),
        ),
        n => bail!("unexpected column count {}", n),
    };

    Ok(CoordsRecord {
        s1: int(0)?,
        e1: int(1)?,
        s2: int(2)?,
        e2: int(3)?,
        len1: int(4)?,
        len2: int(5)?,
        pct_idy: float(6)?,
        len_r,
        len_q,
        cov_r,
        cov_q,
        ref_tag: fields[fields.len() - 2].trim().to_string(),
        qry_tag: fields[fields.len() - 1].trim().to_string(),
    })
}

pub fn read_coords_file(path: &Path) -> Result<Vec<CoordsRecord>> {
    let file = File::open(path)
        .with_context(|| format!("could not open coords file {}", path.display()))?;
    read_coords(file).with_context(|| format!("while reading {}", path.display()))
}

/// Write a headered TSV; optional columns are left empty when absent.
pub fn write_coords(dst: impl Write, records: &[CoordsRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(dst);
    writer.write_record([
        "[S1]", "[E1]", "[S2]", "[E2]", "[LEN 1]", "[LEN 2]", "[% IDY]", "[LEN R]", "[LEN Q]",
        "[COV R]", "[COV Q]", "[TAGS1]", "[TAGS2]",
    ])?;
    let opt_int = |v: Option<u64>| v.map(|x| x.to_string()).unwrap_or_default();
    let opt_float = |v: Option<f64>| v.map(|x| format!("{:.2}", x)).unwrap_or_default();
    for r in records {
        writer.write_record([
            r.s1.to_string(),
            r.e1.to_string(),
            r.s2.to_string(),
            r.e2.to_string(),
            r.len1.to_string(),
            r.len2.to_string(),
            format!("{:.2}", r.pct_idy),
            opt_int(r.len_r),
            opt_int(r.len_q),
            opt_float(r.cov_r),
            opt_float(r.cov_q),
            r.ref_tag.clone(),
            r.qry_tag.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_coords_file(path: &Path, records: &[CoordsRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    write_coords(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COORDS: &str = "\
/data/ref.fa /data/qry.fa
NUCMER

[S1]\t[E1]\t[S2]\t[E2]\t[LEN 1]\t[LEN 2]\t[% IDY]\t[TAGS1]\t[TAGS2]
100\t500\t1\t400\t401\t400\t97.25\tGm01\tscaf_1
600\t900\t450\t750\t301\t301\t88.40\tGm01\tscaf_2
";

    #[test]
    fn test_read_skips_preamble_and_header() {
        let records = read_coords(COORDS.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].s1, 100);
        assert_eq!(records[0].pct_idy, 97.25);
        assert_eq!(records[1].qry_tag, "scaf_2");
        assert!(records[0].len_r.is_none());
    }

    #[test]
    fn test_13_column_variant() {
        let row = "100\t500\t1\t400\t401\t400\t97.25\t50000\t40000\t0.80\t1.00\tGm01\tscaf_1\n";
        let records = read_coords(row.as_bytes()).unwrap();
        assert_eq!(records[0].len_r, Some(50000));
        assert_eq!(records[0].cov_q, Some(1.00));
    }

    #[test]
    fn test_bad_column_count() {
        let row = "100\t500\t1\t400\t401\t400\t97.25\textra\tGm01\tscaf_1\n";
        assert!(read_coords(row.as_bytes()).is_err());
    }
}
